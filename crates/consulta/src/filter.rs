//! `--where` expressions and `--sort` keys.
//!
//! | Expression | Predicate |
//! |------------|-----------|
//! | `field=value` | equals (`true`/`false`, numbers and dates are typed) |
//! | `field>=n` | gte |
//! | `field<=n` | lte |
//! | `field~=a,b,c` | includesAny |
//! | `field@from..to` | rangeOverlap; either end may be omitted |
//!
//! Dates are `YYYY-MM-DD` (a whole day) or RFC 3339 instants.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime};
use consulta_query::{Dir, Number, Op, Operand, Query, TimeRange, Timestamp};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const WHERE_PATTERN: &str =
    r"^\s*(?P<field>[A-Za-z_][A-Za-z0-9_]*)\s*(?P<op>>=|<=|~=|=|@)\s*(?P<value>.*?)\s*$";

static WHERE_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(WHERE_PATTERN));

const DAY_MILLIS: i64 = 86_400_000;

#[derive(Debug, Error)]
pub enum WhereError {
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot parse filter '{0}': expected field=value, field>=n, field<=n, field~=a,b or field@from..to")]
    Syntax(String),

    #[error("'{value}' is not a number or date; {op} needs one")]
    NotOrdered { op: Op, value: String },

    #[error("'{0}' is not a date range: expected from..to with YYYY-MM-DD or RFC 3339 ends")]
    Range(String),

    #[error("empty value list in '{0}'")]
    EmptySet(String),
}

/// One parsed `--where` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub field: String,
    pub op: Op,
    pub operand: Operand,
}

impl WhereClause {
    /// Adds this clause to `query`.
    pub fn apply<T>(&self, query: Query<T>) -> Query<T> {
        query.and(&self.field, self.op, self.operand.clone())
    }
}

impl FromStr for WhereClause {
    type Err = WhereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = WHERE_RE.as_ref().map_err(|e| WhereError::Pattern(e.clone()))?;
        let caps = pattern
            .captures(s)
            .ok_or_else(|| WhereError::Syntax(s.to_string()))?;
        let field = caps["field"].to_string();
        let value = &caps["value"];

        let (op, operand) = match &caps["op"] {
            "=" => (Op::Equals, scalar(value)),
            ">=" => (Op::Gte, ordered(Op::Gte, value)?),
            "<=" => (Op::Lte, ordered(Op::Lte, value)?),
            "~=" => {
                let items: Vec<&str> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .collect();
                if items.is_empty() {
                    return Err(WhereError::EmptySet(s.to_string()));
                }
                (Op::IncludesAny, Operand::set(items))
            }
            "@" => (Op::RangeOverlap, Operand::Range(range(value)?)),
            _ => return Err(WhereError::Syntax(s.to_string())),
        };

        Ok(WhereClause { field, op, operand })
    }
}

/// Typed operand for `=`: booleans, numbers and dates, else text.
fn scalar(value: &str) -> Operand {
    match value {
        "true" => return Operand::Bool(true),
        "false" => return Operand::Bool(false),
        _ => {}
    }
    number(value)
        .map(Operand::Number)
        .or_else(|| instant(value).map(Operand::Timestamp))
        .unwrap_or_else(|| Operand::Text(value.to_string()))
}

/// Operand for `>=`/`<=`: a number or a date. A bare date bound covers the
/// whole day on the `<=` side.
fn ordered(op: Op, value: &str) -> Result<Operand, WhereError> {
    if let Some(n) = number(value) {
        return Ok(Operand::Number(n));
    }
    if let Some(day) = day_start(value) {
        let t = match op {
            Op::Lte => Timestamp(day.0 + DAY_MILLIS - 1),
            _ => day,
        };
        return Ok(Operand::Timestamp(t));
    }
    instant(value)
        .map(Operand::Timestamp)
        .ok_or_else(|| WhereError::NotOrdered {
            op,
            value: value.to_string(),
        })
}

fn range(value: &str) -> Result<TimeRange, WhereError> {
    let err = || WhereError::Range(value.to_string());
    let (from, to) = value.split_once("..").ok_or_else(err)?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() && to.is_empty() {
        return Err(err());
    }

    let start = if from.is_empty() {
        Timestamp(i64::MIN)
    } else {
        day_start(from).or_else(|| instant(from)).ok_or_else(err)?
    };
    let end = if to.is_empty() {
        Timestamp(i64::MAX)
    } else if let Some(day) = day_start(to) {
        Timestamp(day.0 + DAY_MILLIS - 1)
    } else {
        instant(to).ok_or_else(err)?
    };
    Ok(TimeRange::new(start, end))
}

fn number(value: &str) -> Option<Number> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(Number::I64(n));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::F64)
}

fn day_start(value: &str) -> Option<Timestamp> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| Timestamp::from(d.and_time(NaiveTime::MIN)))
}

fn instant(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(Timestamp::from)
        .or_else(|| day_start(value))
}

/// A `--sort field[:asc|desc]` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    /// `None` lets the record shape pick its preferred direction.
    pub dir: Option<Dir>,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field.trim(), Some(dir.trim().parse::<Dir>()?)),
            None => (s.trim(), None),
        };
        if field.is_empty() {
            return Err(format!("missing sort field in '{s}'"));
        }
        Ok(SortKey {
            field: field.to_string(),
            dir,
        })
    }
}
