//! Field predicates.
//!
//! A [`Predicate`] is one `(field, operator, operand)` triple. All predicates
//! of a query must hold for a record to survive the filter stage.

use std::cmp::Ordering;

use crate::collate::collate;
use crate::op::Op;
use crate::value::{Number, TimeRange, Timestamp, Value};

/// A single filter predicate.
///
/// ```
/// use consulta_query::{Op, Operand, Predicate, Value};
///
/// let p = Predicate::new("specialties", Op::IncludesAny, Operand::set(["Reiki", "Yoga"]));
/// assert!(p.matches(&Value::tags(["Meditación", "Reiki"])));
/// assert!(!p.matches(&Value::tags(["Meditación"])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub operand: Operand,
}

impl Predicate {
    /// Creates a new predicate.
    pub fn new(field: impl Into<String>, op: Op, operand: impl Into<Operand>) -> Self {
        Predicate {
            field: field.into(),
            op,
            operand: operand.into(),
        }
    }

    /// Evaluates this predicate against a field value.
    ///
    /// Absent values and operand/value type mismatches never match.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        if value.is_none() {
            return false;
        }
        match self.op {
            Op::Equals | Op::Gte | Op::Lte => self.match_ordering(value),
            Op::IncludesAny => self.match_includes_any(value),
            Op::RangeOverlap => self.match_overlap(value),
        }
    }

    fn match_ordering(&self, value: &Value<'_>) -> bool {
        // Equality against a tag list means "any element equals".
        if let (Op::Equals, Operand::Text(expected), Value::Tags(tags)) =
            (self.op, &self.operand, value)
        {
            return tags.iter().any(|t| t == expected);
        }
        match compare_to_operand(value, &self.operand) {
            Some(ordering) => self.op.eval_ordering(ordering),
            None => false,
        }
    }

    fn match_includes_any(&self, value: &Value<'_>) -> bool {
        let Operand::Set(set) = &self.operand else {
            return false;
        };
        match value {
            Value::Tags(tags) => tags.iter().any(|t| set.iter().any(|s| s == t)),
            Value::Text(s) => set.iter().any(|candidate| candidate == s),
            _ => false,
        }
    }

    fn match_overlap(&self, value: &Value<'_>) -> bool {
        let Operand::Range(range) = &self.operand else {
            return false;
        };
        match value {
            Value::Range(r) => r.overlaps(range),
            Value::Timestamp(t) => range.contains(*t),
            _ => false,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.operand)
    }
}

/// Compares a field value with an operand of the same kind.
fn compare_to_operand(value: &Value<'_>, operand: &Operand) -> Option<Ordering> {
    match (value, operand) {
        (Value::Text(s), Operand::Text(expected)) => Some(collate(s, expected)),
        (Value::Number(n), Operand::Number(expected)) => n.compare(*expected),
        (Value::Timestamp(t), Operand::Timestamp(expected)) => Some(t.cmp(expected)),
        (Value::Bool(b), Operand::Bool(expected)) => Some(b.cmp(expected)),
        _ => None,
    }
}

/// Owned comparison value stored in a predicate.
///
/// Unlike [`Value`], which borrows from the record, `Operand` owns its data so
/// queries can outlive the collections they run against.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Point in time.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Candidate set for `IncludesAny`.
    Set(Vec<String>),
    /// Interval for `RangeOverlap`.
    Range(TimeRange),
}

impl Operand {
    /// Builds a candidate set from any iterator of strings.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Operand::Set(items.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Text(s) => write!(f, "{s:?}"),
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Timestamp(t) => write!(f, "@{}", t.as_millis()),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Set(items) => write!(f, "[{}]", items.join(", ")),
            Operand::Range(r) => write!(f, "@{}..@{}", r.start().as_millis(), r.end().as_millis()),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Timestamp> for Operand {
    fn from(t: Timestamp) -> Self {
        Operand::Timestamp(t)
    }
}

impl From<TimeRange> for Operand {
    fn from(r: TimeRange) -> Self {
        Operand::Range(r)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Vec<String>> for Operand {
    fn from(items: Vec<String>) -> Self {
        Operand::Set(items)
    }
}

impl From<Vec<&str>> for Operand {
    fn from(items: Vec<&str>) -> Self {
        Operand::set(items)
    }
}

macro_rules! operand_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(n: $ty) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
