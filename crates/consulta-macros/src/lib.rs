//! Proc macros for Consulta.
//!
//! - [`Queryable`] - Generate a field accessor table and field-name constants
//!   from struct field annotations.

mod queryable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `consulta_query::Queryable` for a struct.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `text` | String-like field (`String`, `&str`, `Cow<str>`) |
/// | `number` | Any primitive numeric field |
/// | `timestamp` | Any type implementing `ToTimestamp` (chrono types, `i64` millis) |
/// | `boolean` | `bool` field |
/// | `tags` | Collection of string-likes (`Vec<String>`) |
/// | `searchable` | Include in the default free-text search fields |
/// | `rename = "..."` | Use a custom name for queries |
/// | `skip` | Exclude this field |
///
/// Fields without a `#[query(...)]` kind are not exposed. `Option<_>` fields
/// yield `Value::None` when empty.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Therapist::PRICE`, `Therapist::NEXT_AVAILABLE`)
/// 2. `Queryable::field_accessors()` and `Queryable::searchable_fields()`
///
/// # Example
///
/// ```ignore
/// use consulta_macros::Queryable;
/// use consulta_query::{ListQueryEngine, Query};
///
/// #[derive(Queryable)]
/// struct Notification {
///     #[query(text, searchable)]
///     title: String,
///     #[query(text, searchable)]
///     message: String,
///     #[query(boolean)]
///     read: bool,
/// }
///
/// let engine = ListQueryEngine::<Notification>::for_queryable();
/// let query = Query::for_queryable()
///     .search("cita")
///     .and_eq(Notification::READ, false);
/// let unread = engine.execute(&inbox, &query)?;
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn queryable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    queryable::queryable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
