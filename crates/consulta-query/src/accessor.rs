//! Field accessor tables.
//!
//! A [`FieldAccessors`] table maps logical field names ("price", "rating",
//! "starts_at") to extraction functions for one record shape. The engine only
//! ever reads records through such a table.

use std::fmt;

use crate::value::Value;

type AccessorFn<T> = Box<dyn for<'a> Fn(&'a T) -> Value<'a> + Send + Sync>;

struct Entry<T> {
    name: String,
    accessor: AccessorFn<T>,
}

/// Named field extractors for records of type `T`.
///
/// # Example
///
/// ```
/// use consulta_query::{FieldAccessors, Value};
///
/// struct Payment {
///     concept: String,
///     amount: f64,
/// }
///
/// let accessors = FieldAccessors::<Payment>::new()
///     .field("concept", |p| Value::text(&p.concept))
///     .field("amount", |p| Value::from(p.amount));
///
/// let payment = Payment { concept: "Sesión individual".into(), amount: 60.0 };
/// assert!(accessors.contains("amount"));
/// assert_eq!(accessors.value(&payment, "amount"), Some(Value::from(60.0)));
/// assert_eq!(accessors.value(&payment, "method"), None);
/// ```
pub struct FieldAccessors<T> {
    entries: Vec<Entry<T>>,
}

impl<T> FieldAccessors<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        FieldAccessors {
            entries: Vec::new(),
        }
    }

    /// Adds (or replaces) a field accessor, builder style.
    pub fn field<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Value<'a> + Send + Sync + 'static,
    {
        self.insert(name, accessor);
        self
    }

    /// Adds a field accessor, replacing any existing one with the same name.
    pub fn insert<F>(&mut self, name: impl Into<String>, accessor: F)
    where
        F: for<'a> Fn(&'a T) -> Value<'a> + Send + Sync + 'static,
    {
        let name = name.into();
        let accessor: AccessorFn<T> = Box::new(accessor);
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.accessor = accessor,
            None => self.entries.push(Entry { name, accessor }),
        }
    }

    /// Returns `true` if `name` has an accessor.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Reads field `name` from `record`, or `None` if the field is unknown.
    pub fn value<'a>(&self, record: &'a T, name: &str) -> Option<Value<'a>> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| (e.accessor)(record))
    }

    /// Field names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no field is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the subset of `fields` that have no accessor, deduplicated and
    /// in first-seen order.
    pub fn missing<'f, I>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'f str>,
    {
        let mut missing: Vec<String> = Vec::new();
        for field in fields {
            if !self.contains(field) && !missing.iter().any(|m| m == field) {
                missing.push(field.to_string());
            }
        }
        missing
    }
}

impl<T> Default for FieldAccessors<T> {
    fn default() -> Self {
        FieldAccessors::new()
    }
}

impl<T> fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessors")
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Notification {
        title: String,
        read: bool,
    }

    fn table() -> FieldAccessors<Notification> {
        FieldAccessors::<Notification>::new()
            .field("title", |n| Value::text(&n.title))
            .field("read", |n| Value::Bool(n.read))
    }

    #[test]
    fn reads_registered_fields() {
        let n = Notification {
            title: "Cita confirmada".into(),
            read: false,
        };
        let accessors = table();
        assert_eq!(accessors.value(&n, "title"), Some(Value::text("Cita confirmada")));
        assert_eq!(accessors.value(&n, "read"), Some(Value::Bool(false)));
        assert_eq!(accessors.value(&n, "category"), None);
    }

    #[test]
    fn insert_replaces_existing_field() {
        let mut accessors = table();
        accessors.insert("read", |_| Value::Bool(true));
        let n = Notification {
            title: String::new(),
            read: false,
        };
        assert_eq!(accessors.len(), 2);
        assert_eq!(accessors.value(&n, "read"), Some(Value::Bool(true)));
    }

    #[test]
    fn names_keep_registration_order() {
        assert_eq!(table().names().collect::<Vec<_>>(), vec!["title", "read"]);
    }

    #[test]
    fn missing_dedupes_in_order() {
        let missing = table().missing(["nope", "title", "other", "nope"]);
        assert_eq!(missing, vec!["nope".to_string(), "other".to_string()]);
    }

    #[test]
    fn debug_lists_fields() {
        assert_eq!(
            format!("{:?}", table()),
            r#"FieldAccessors { fields: ["title", "read"] }"#
        );
    }

    #[test]
    fn tables_are_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<FieldAccessors<Notification>>();
    }
}
