//! Sort direction, sort specification and the default value comparator.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::collate::collate;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to a comparator result.
    ///
    /// `Equal` stays `Equal`, which keeps a stable sort stable in both
    /// directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Record-level comparator that replaces the default field ordering.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// What to sort by.
///
/// `field` must always resolve in the accessor table, even when a custom
/// comparator is supplied; the comparator only replaces how two records are
/// ordered.
pub struct SortSpec<T> {
    /// The field to sort by.
    pub field: String,
    /// The sort direction, applied to the comparator's result.
    pub dir: Dir,
    /// Optional override of the default value ordering.
    pub comparator: Option<Comparator<T>>,
}

impl<T> SortSpec<T> {
    /// Sorts by a field's value.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
            comparator: None,
        }
    }

    /// Sorts with a custom comparator, reported under `field`.
    pub fn with_comparator<F>(field: impl Into<String>, dir: Dir, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        SortSpec {
            field: field.into(),
            dir,
            comparator: Some(Arc::new(comparator)),
        }
    }

    /// Returns `true` if a custom comparator overrides value ordering.
    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        SortSpec {
            field: self.field.clone(),
            dir: self.dir,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> fmt::Debug for SortSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSpec")
            .field("field", &self.field)
            .field("dir", &self.dir)
            .field("comparator", &self.comparator.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Compares two values of the same kind.
///
/// Numbers and timestamps compare numerically, text by collation, tag lists
/// element-wise, ranges by start then end. Absent values sort after present
/// ones. Returns `None` for mismatched kinds or NaN.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => Some(collate(a, b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Tags(a), Value::Tags(b)) => Some(compare_tags(a, b)),
        (Value::Range(a), Value::Range(b)) => Some(
            a.start()
                .cmp(&b.start())
                .then_with(|| a.end().cmp(&b.end())),
        ),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Total order over values, used by the default sort.
///
/// Numbers use [`Number::sort_cmp`](crate::Number::sort_cmp), so NaN sorts
/// after every other number. Other same-kind pairs use [`compare_values`].
/// Values of different kinds are grouped by kind in the order text, number,
/// timestamp, bool, tags, range, absent.
pub fn sort_order(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.sort_cmp(*b),
        _ => compare_values(a, b).unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b))),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Text(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Bool(_) => 3,
        Value::Tags(_) => 4,
        Value::Range(_) => 5,
        Value::None => 6,
    }
}

fn compare_tags<S: AsRef<str>>(a: &[S], b: &[S]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ordering = collate(x.as_ref(), y.as_ref());
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}
