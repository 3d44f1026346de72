//! Consulta query - search, filter, sort and paginate in-memory record lists.
//!
//! Every list screen of the booking client (therapists, favorites,
//! appointments, notifications, payments) runs the same pipeline over a small
//! in-memory collection. This crate is that pipeline, written once:
//!
//! - Free-text search, case-insensitive, over caller-chosen fields
//! - Field predicates: `equals`, `includesAny`, `gte`, `lte`, `rangeOverlap`
//! - Stable sort by a field or a custom comparator, ascending or descending
//! - 1-based pagination with total and page count
//!
//! # Quick Start
//!
//! ```rust
//! use consulta_query::{execute, FieldAccessors, Query, Value};
//!
//! struct Therapist {
//!     name: String,
//!     specialties: Vec<String>,
//!     price: u32,
//!     rating: f64,
//! }
//!
//! let accessors = FieldAccessors::<Therapist>::new()
//!     .field("name", |t| Value::text(&t.name))
//!     .field("specialties", |t| Value::tags(&t.specialties))
//!     .field("price", |t| Value::from(t.price))
//!     .field("rating", |t| Value::from(t.rating));
//!
//! let therapists = vec![
//!     Therapist {
//!         name: "Dra. María González".into(),
//!         specialties: vec!["Reiki".into(), "Sanación con Cristales".into()],
//!         price: 45,
//!         rating: 4.9,
//!     },
//!     Therapist {
//!         name: "Carlos Ruiz".into(),
//!         specialties: vec!["Yoga Terapéutico".into()],
//!         price: 40,
//!         rating: 4.7,
//!     },
//! ];
//!
//! let query = Query::new()
//!     .search("reiki")
//!     .search_in(["name", "specialties"])
//!     .and_lte("price", 60)
//!     .order_desc("rating")
//!     .page(1, 10)
//!     .build();
//!
//! let result = execute(&therapists, &accessors, &query).unwrap();
//! assert_eq!(result.total, 1);
//! assert_eq!(result.items[0].name, "Dra. María González");
//! ```
//!
//! # Pipeline Semantics
//!
//! ```text
//! keep(record) = (blank term ∨ ∃ searchable field containing term)
//!              ∧ (∀ predicate holds)
//! result       = paginate(stable_sort(filter(records)))
//! ```
//!
//! - Every field the query names must have an accessor, otherwise
//!   [`QueryError::MissingAccessor`] is returned before any record is read.
//! - A page past the end yields no items but keeps `total` and `page_count`.
//! - A page size of 0 disables pagination.
//!
//! # Value Kinds and Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Text | `Equals`, `IncludesAny` (membership), `Gte`, `Lte` (collated) |
//! | Number | `Equals`, `Gte`, `Lte` |
//! | Timestamp | `Equals`, `Gte`, `Lte`, `RangeOverlap` |
//! | Bool | `Equals` |
//! | Tags | `Equals` (any element), `IncludesAny` |
//! | Range | `RangeOverlap` |

mod accessor;
mod collate;
mod engine;
mod error;
mod op;
mod ordering;
mod page;
mod predicate;
mod query;
mod search;
mod traits;
mod value;

pub use accessor::FieldAccessors;
pub use collate::{collate, collation_key};
pub use engine::{execute, ListQueryEngine, QueryResult};
pub use error::{QueryError, Result};
pub use op::{Op, UnknownOp};
pub use ordering::{compare_values, sort_order, Comparator, Dir, SortSpec};
pub use page::PageRequest;
pub use predicate::{Operand, Predicate};
pub use query::Query;
pub use traits::{Queryable, ToTimestamp};
pub use value::{Number, TimeRange, Timestamp, Value};
