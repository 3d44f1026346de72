//! Traits for derive macro support.
//!
//! [`Queryable`] is implemented by `#[derive(Queryable)]` from
//! `consulta-macros`, or by hand for record shapes that need computed fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::accessor::FieldAccessors;
use crate::value::Timestamp;

/// A record shape with a known field accessor table.
///
/// # Derive Usage
///
/// ```ignore
/// use consulta_macros::Queryable;
///
/// #[derive(Queryable)]
/// struct Notification {
///     #[query(text, searchable)]
///     title: String,
///     #[query(boolean)]
///     read: bool,
/// }
///
/// let engine = ListQueryEngine::<Notification>::for_queryable();
/// ```
///
/// # Manual Implementation
///
/// ```
/// use consulta_query::{FieldAccessors, Queryable, Value};
///
/// struct Payment {
///     concept: String,
///     amount: f64,
/// }
///
/// impl Queryable for Payment {
///     fn field_accessors() -> FieldAccessors<Self> {
///         FieldAccessors::<Self>::new()
///             .field("concept", |p| Value::text(&p.concept))
///             .field("amount", |p| Value::from(p.amount))
///     }
///
///     fn searchable_fields() -> &'static [&'static str] {
///         &["concept"]
///     }
/// }
///
/// assert_eq!(Payment::field_accessors().len(), 2);
/// ```
pub trait Queryable: Sized {
    /// Builds the accessor table for this record shape.
    fn field_accessors() -> FieldAccessors<Self>;

    /// Fields matched by free-text search when the query does not name any.
    fn searchable_fields() -> &'static [&'static str] {
        &[]
    }
}

/// Conversion into an engine [`Timestamp`].
///
/// Used by the derive macro for `#[query(timestamp)]` fields.
pub trait ToTimestamp {
    /// Converts this value to a [`Timestamp`].
    fn to_timestamp(&self) -> Timestamp;
}

impl ToTimestamp for Timestamp {
    fn to_timestamp(&self) -> Timestamp {
        *self
    }
}

impl ToTimestamp for i64 {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl<Tz: TimeZone> ToTimestamp for DateTime<Tz> {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.timestamp_millis())
    }
}

impl ToTimestamp for NaiveDateTime {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from(*self)
    }
}

impl ToTimestamp for NaiveDate {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from(*self)
    }
}
