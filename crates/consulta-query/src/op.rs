//! Predicate operators.

use std::cmp::Ordering;
use std::str::FromStr;

/// Operator of a single predicate.
///
/// - `Equals`: exact match (any element, on tag lists)
/// - `IncludesAny`: field shares at least one value with the operand set
/// - `Gte`, `Lte`: inclusive bounds on numbers, timestamps and text
/// - `RangeOverlap`: field range (or instant) intersects the operand range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Exact match.
    Equals,
    /// Set intersection is non-empty.
    IncludesAny,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Closed ranges intersect.
    RangeOverlap,
}

impl Op {
    /// All operators, in declaration order.
    pub const ALL: [Op; 5] = [
        Op::Equals,
        Op::IncludesAny,
        Op::Gte,
        Op::Lte,
        Op::RangeOverlap,
    ];

    /// Returns `true` for operators decided by an [`Ordering`].
    pub fn is_ordering_op(self) -> bool {
        matches!(self, Op::Equals | Op::Gte | Op::Lte)
    }

    /// Evaluates this operator given `field.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Equals => ordering == Ordering::Equal,
            Op::Gte => ordering != Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::IncludesAny | Op::RangeOverlap => false,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equals => "equals",
            Op::IncludesAny => "includesAny",
            Op::Gte => "gte",
            Op::Lte => "lte",
            Op::RangeOverlap => "rangeOverlap",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOp(pub String);

impl FromStr for Op {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" | "eq" => Ok(Op::Equals),
            "includesAny" | "includes_any" | "in" => Ok(Op::IncludesAny),
            "gte" => Ok(Op::Gte),
            "lte" => Ok(Op::Lte),
            "rangeOverlap" | "range_overlap" | "overlaps" => Ok(Op::RangeOverlap),
            other => Err(UnknownOp(other.to_string())),
        }
    }
}
