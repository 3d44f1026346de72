//! The `Record` trait tying a record shape to its collection.

use consulta_query::{Comparator, Dir, Queryable, SortSpec};
use serde::{de::DeserializeOwned, Serialize};

/// A record shape served by a list screen.
pub trait Record: Queryable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, used as the file stem for file sources.
    const COLLECTION: &'static str;

    /// Built-in records backing the in-memory source.
    fn seed() -> Vec<Self>;

    /// Named custom comparator, if this shape defines one for `name`.
    fn comparator(_name: &str) -> Option<Comparator<Self>> {
        None
    }

    /// Direction used when a sort names `field` without one.
    fn preferred_dir(_field: &str) -> Dir {
        Dir::Asc
    }
}

/// Builds the sort for `field`, picking up a named comparator when the
/// record shape defines one.
pub fn sort_spec<R: Record>(field: &str, dir: Option<Dir>) -> SortSpec<R> {
    SortSpec {
        field: field.to_string(),
        dir: dir.unwrap_or_else(|| R::preferred_dir(field)),
        comparator: R::comparator(field),
    }
}
