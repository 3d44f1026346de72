//! Record shapes and record sources for the consulta list screens.
//!
//! Each list screen of the booking client queries one collection:
//!
//! | Collection | Record | Searchable by default |
//! |------------|--------|-----------------------|
//! | `therapists` | [`Therapist`] | name, title, specialties, location |
//! | `favorites` | [`Favorite`] | name, title, specialties |
//! | `appointments` | [`Appointment`] | therapist, kind |
//! | `notifications` | [`Notification`] | title, message |
//! | `payments` | [`Payment`] | concept, therapist |
//!
//! Records come from a [`RecordSource`], chosen by [`SourceConfig`]: the
//! built-in seed data behind a [`MemorySource`], or JSON/YAML files behind a
//! [`FileSource`].
//!
//! ```no_run
//! use consulta_query::{ListQueryEngine, Query};
//! use consulta_records::{sort_spec, RecordSource, SourceConfig, Therapist};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SourceConfig::default().build::<Therapist>()?;
//! let therapists = source.fetch().await?;
//!
//! let query = Query::for_queryable()
//!     .search("ansiedad")
//!     .and_eq("online", true)
//!     .sort(sort_spec::<Therapist>("relevance", None))
//!     .page(1, 6);
//!
//! let page = ListQueryEngine::<Therapist>::for_queryable().execute(&therapists, &query)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod models;
mod record;
pub mod seed;
mod source;

pub use config::{Config, SourceConfig, SourceKind, DEFAULT_PAGE_SIZE};
pub use error::{ConfigError, SourceError};
pub use models::{
    by_availability, by_relevance, Appointment, AppointmentKind, AppointmentStatus, Favorite,
    Notification, NotificationCategory, Payment, PaymentStatus, Therapist, TODAY_PREFIX,
};
pub use record::{sort_spec, Record};
pub use source::{FileFormat, FileSource, MemorySource, RecordSource};
