//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a field accessor returns for a record. It covers
//! the shapes the booking screens filter and sort on: text, numbers,
//! timestamps, booleans, tag lists and time ranges.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Runtime value for comparison, usually borrowed from the source record.
///
/// # Example
///
/// ```
/// use consulta_query::{Number, Value};
///
/// struct Therapist {
///     name: String,
///     price: u32,
///     specialties: Vec<String>,
/// }
///
/// let t = Therapist {
///     name: "Dra. María González".into(),
///     price: 75,
///     specialties: vec!["Reiki".into()],
/// };
///
/// assert_eq!(Value::text(&t.name).as_text(), Some("Dra. María González"));
/// assert_eq!(Value::from(t.price).as_number(), Some(Number::U64(75)));
/// assert_eq!(Value::tags(&t.specialties).as_tags().map(|t| t.len()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value, borrowed when the record holds it verbatim.
    Text(Cow<'a, str>),
    /// Numeric value.
    Number(Number),
    /// Point in time (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Multi-valued text field (specialties, tags, languages).
    Tags(Vec<Cow<'a, str>>),
    /// Closed time interval.
    Range(TimeRange),
    /// Field absent for this record.
    None,
}

impl<'a> Value<'a> {
    /// Creates a text value.
    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        Value::Text(s.into())
    }

    /// Creates a tag list from any iterator of string-likes.
    pub fn tags<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        Value::Tags(items.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `Text` value.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Timestamp` value.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a `Tags` value.
    pub fn is_tags(&self) -> bool {
        matches!(self, Value::Tags(_))
    }

    /// Returns `true` if this is a `Range` value.
    pub fn is_range(&self) -> bool {
        matches!(self, Value::Range(_))
    }

    /// Extracts the text, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the tag list, if present.
    pub fn as_tags(&self) -> Option<&[Cow<'a, str>]> {
        match self {
            Value::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// Extracts the time range, if present.
    pub fn as_range(&self) -> Option<TimeRange> {
        match self {
            Value::Range(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Bool(_) => "bool",
            Value::Tags(_) => "tags",
            Value::Range(_) => "range",
            Value::None => "none",
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a [String]> for Value<'a> {
    fn from(items: &'a [String]) -> Self {
        Value::tags(items)
    }
}

impl<'a> From<&'a Vec<String>> for Value<'a> {
    fn from(items: &'a Vec<String>) -> Self {
        Value::tags(items)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<TimeRange> for Value<'_> {
    fn from(r: TimeRange) -> Self {
        Value::Range(r)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Numeric value supporting all common numeric types.
///
/// Integers keep their precision. [`Number::compare`] falls back to `f64`
/// across variants; [`Number::sort_cmp`] stays exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Total order for sorting: exact across representations, NaN after
    /// every other number, `-0.0` equal to `0.0`.
    pub fn sort_cmp(self, other: Number) -> Ordering {
        match (self.as_int(), other.as_int()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => int_float_cmp(a, other.to_f64()),
            (None, Some(b)) => int_float_cmp(b, self.to_f64()).reverse(),
            (None, None) => {
                let (a, b) = (self.to_f64(), other.to_f64());
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                }
            }
        }
    }

    fn as_int(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }
}

fn int_float_cmp(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }
    // Beyond the i64/u64 span the integer cannot reach the float.
    if float >= 1.9e19 {
        return Ordering::Less;
    }
    if float <= -9.3e18 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Point in time as milliseconds since Unix epoch.
///
/// Timezone-agnostic; convert from `chrono` types with `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns whole seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp(dt.and_utc().timestamp_millis())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::from(date.and_time(chrono::NaiveTime::MIN))
    }
}

/// Closed interval `[start, end]` of timestamps.
///
/// The constructor orders its endpoints, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Creates a range, swapping the endpoints if given in reverse.
    pub fn new(a: impl Into<Timestamp>, b: impl Into<Timestamp>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            TimeRange { start: a, end: b }
        } else {
            TimeRange { start: b, end: a }
        }
    }

    /// A range covering a single instant.
    pub fn instant(t: impl Into<Timestamp>) -> Self {
        let t = t.into();
        TimeRange { start: t, end: t }
    }

    /// Returns the lower endpoint.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the upper endpoint.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Returns `true` if both ranges share at least one instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Returns `true` if `t` lies inside the range (inclusive).
    pub fn contains(&self, t: Timestamp) -> bool {
        self.start <= t && t <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn value_type_checks() {
        assert!(Value::text("test").is_text());
        assert!(Value::Number(Number::I64(42)).is_number());
        assert!(Value::Timestamp(Timestamp(0)).is_timestamp());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::tags(["a", "b"]).is_tags());
        assert!(Value::Range(TimeRange::instant(0)).is_range());
        assert!(Value::None.is_none());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::text("hello").as_text(), Some("hello"));
        assert_eq!(Value::from(42i64).as_number(), Some(Number::I64(42)));
        assert_eq!(
            Value::Timestamp(Timestamp(1000)).as_timestamp(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));

        assert_eq!(Value::text("test").as_number(), None);
        assert_eq!(Value::from(1i64).as_text(), None);
        assert_eq!(Value::None.as_tags(), None);
    }

    #[test]
    fn borrowed_text_does_not_allocate() {
        let name = String::from("Laura");
        match Value::from(&name) {
            Value::Text(Cow::Borrowed(s)) => assert_eq!(s, "Laura"),
            other => panic!("expected borrowed text, got {other:?}"),
        }
    }

    #[test]
    fn option_maps_to_none() {
        let missing: Option<f64> = None;
        assert!(Value::from(missing).is_none());
        assert_eq!(Value::from(Some(4.5f64)), Value::Number(Number::F64(4.5)));
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn sort_cmp_puts_nan_last() {
        let nan = Number::F64(f64::NAN);
        assert_eq!(nan.sort_cmp(Number::F64(f64::INFINITY)), Ordering::Greater);
        assert_eq!(Number::I64(i64::MAX).sort_cmp(nan), Ordering::Less);
        assert_eq!(nan.sort_cmp(nan), Ordering::Equal);
    }

    #[test]
    fn sort_cmp_is_exact_across_representations() {
        assert_eq!(Number::I64(-1).sort_cmp(Number::U64(0)), Ordering::Less);
        assert_eq!(Number::I64(5).sort_cmp(Number::F64(5.0)), Ordering::Equal);
        assert_eq!(Number::I64(-2).sort_cmp(Number::F64(-2.5)), Ordering::Greater);
        assert_eq!(Number::F64(4.5).sort_cmp(Number::U64(5)), Ordering::Less);
        assert_eq!(Number::F64(-0.0).sort_cmp(Number::I64(0)), Ordering::Equal);
        // 2^53 + 1 is not representable as f64.
        let big = 9_007_199_254_740_993i64;
        assert_eq!(
            Number::I64(big).sort_cmp(Number::F64(9_007_199_254_740_992.0)),
            Ordering::Greater
        );
        assert_eq!(
            Number::U64(u64::MAX).sort_cmp(Number::F64(f64::INFINITY)),
            Ordering::Less
        );
    }

    #[test]
    fn timestamp_from_chrono() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(Timestamp::from(dt).as_secs(), dt.timestamp());

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(Timestamp::from(date), Timestamp::from(midnight));
    }

    #[test]
    fn range_orders_endpoints() {
        let r = TimeRange::new(2000, 1000);
        assert_eq!(r.start(), Timestamp(1000));
        assert_eq!(r.end(), Timestamp(2000));
    }

    #[test]
    fn range_overlap_is_inclusive() {
        let a = TimeRange::new(1000, 2000);
        assert!(a.overlaps(&TimeRange::new(2000, 3000)));
        assert!(a.overlaps(&TimeRange::new(0, 1000)));
        assert!(a.overlaps(&TimeRange::new(1200, 1300)));
        assert!(!a.overlaps(&TimeRange::new(2001, 3000)));
        assert!(a.contains(Timestamp(1500)));
        assert!(!a.contains(Timestamp(999)));
    }
}
