//! Query execution: filter, then sort, then paginate.

use serde::Serialize;

use crate::accessor::FieldAccessors;
use crate::error::{QueryError, Result};
use crate::ordering::sort_order;
use crate::query::Query;
use crate::search::{needle, value_contains};
use crate::traits::Queryable;
use crate::value::Value;

/// One page of a query's results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<I> {
    /// The page slice, in sorted order.
    pub items: Vec<I>,
    /// Records that passed the filter stage, before pagination.
    pub total: usize,
    /// The page index the caller asked for, echoed back unclamped.
    pub page: usize,
    /// The page size the caller asked for (0 = unpaginated).
    pub page_size: usize,
    /// `max(1, ceil(total / page_size))`.
    pub page_count: usize,
}

impl<I> QueryResult<I> {
    /// Returns `true` if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page.max(1) < self.page_count
    }

    /// Returns `true` if an earlier, non-empty page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total > 0
    }

    /// Transforms each item, keeping the pagination metadata.
    pub fn map<U, F>(self, f: F) -> QueryResult<U>
    where
        F: FnMut(I) -> U,
    {
        QueryResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            page_count: self.page_count,
        }
    }
}

impl<T: Clone> QueryResult<&T> {
    /// Clones the borrowed items into an owned result.
    pub fn cloned(self) -> QueryResult<T> {
        self.map(Clone::clone)
    }
}

/// Runs `query` over `records` through `accessors`.
///
/// Fails only when the query references a field with no accessor; the check
/// runs before any record is read, so it fails even on an empty collection.
/// `records` is never mutated, and the same inputs always produce the same
/// result.
///
/// # Example
///
/// ```
/// use consulta_query::{execute, FieldAccessors, Query, Value};
///
/// let prices = vec![45u32, 40, 90, 75, 85, 95, 75];
/// let accessors = FieldAccessors::<u32>::new().field("price", |p| Value::from(*p));
///
/// let query = Query::new().and_gte("price", 75).order_asc("price").page(1, 3);
/// let result = execute(&prices, &accessors, &query).unwrap();
///
/// assert_eq!(result.items, vec![&75, &75, &85]);
/// assert_eq!(result.total, 5);
/// assert_eq!(result.page_count, 2);
/// ```
pub fn execute<'r, T>(
    records: &'r [T],
    accessors: &FieldAccessors<T>,
    query: &Query<T>,
) -> Result<QueryResult<&'r T>> {
    let missing = accessors.missing(query.referenced_fields());
    if !missing.is_empty() {
        return Err(QueryError::MissingAccessor { fields: missing });
    }

    let filtered = filter(records, accessors, query);
    let sorted = sort(filtered, accessors, query);
    Ok(paginate(sorted, query))
}

fn filter<'r, T>(records: &'r [T], accessors: &FieldAccessors<T>, query: &Query<T>) -> Vec<&'r T> {
    let needle = needle(query.search_term());
    records
        .iter()
        .filter(|&record| {
            let found = match &needle {
                None => true,
                Some(needle) => query
                    .search_fields()
                    .iter()
                    .any(|field| value_contains(&read(accessors, record, field), needle)),
            };
            found
                && query
                    .predicates()
                    .iter()
                    .all(|p| p.matches(&read(accessors, record, &p.field)))
        })
        .collect()
}

fn sort<'r, T>(records: Vec<&'r T>, accessors: &FieldAccessors<T>, query: &Query<T>) -> Vec<&'r T> {
    let Some(spec) = query.sort_spec() else {
        return records;
    };
    let dir = spec.dir;

    if let Some(comparator) = &spec.comparator {
        let mut records = records;
        records.sort_by(|a, b| dir.apply(comparator(*a, *b)));
        return records;
    }

    let mut keyed: Vec<(Value<'r>, &'r T)> = records
        .into_iter()
        .map(|record| (read(accessors, record, &spec.field), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| dir.apply(sort_order(a, b)));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn paginate<I, T>(sorted: Vec<I>, query: &Query<T>) -> QueryResult<I> {
    let page = query.page_request();
    let total = sorted.len();
    let bounds = page.bounds(total);
    let items = sorted
        .into_iter()
        .skip(bounds.start)
        .take(bounds.len())
        .collect();

    QueryResult {
        items,
        total,
        page: page.index,
        page_size: page.size,
        page_count: page.page_count(total),
    }
}

fn read<'r, T>(accessors: &FieldAccessors<T>, record: &'r T, field: &str) -> Value<'r> {
    // Fields were validated up front.
    accessors.value(record, field).unwrap_or(Value::None)
}

/// A query engine bound to one record shape's accessor table.
///
/// ```
/// use consulta_query::{FieldAccessors, ListQueryEngine, Query, Value};
///
/// struct Notification {
///     title: String,
///     read: bool,
/// }
///
/// let engine = ListQueryEngine::new(
///     FieldAccessors::<Notification>::new()
///         .field("title", |n| Value::text(&n.title))
///         .field("read", |n| Value::Bool(n.read)),
/// );
///
/// let inbox = vec![
///     Notification { title: "Recordatorio de cita".into(), read: false },
///     Notification { title: "Pago recibido".into(), read: true },
/// ];
///
/// let unread = engine
///     .execute(&inbox, &Query::new().and_eq("read", false))
///     .unwrap();
/// assert_eq!(unread.total, 1);
/// assert_eq!(unread.items[0].title, "Recordatorio de cita");
/// ```
#[derive(Debug)]
pub struct ListQueryEngine<T> {
    accessors: FieldAccessors<T>,
}

impl<T> ListQueryEngine<T> {
    /// Binds an engine to an accessor table.
    pub fn new(accessors: FieldAccessors<T>) -> Self {
        ListQueryEngine { accessors }
    }

    /// Binds an engine to `T`'s own accessor table.
    pub fn for_queryable() -> Self
    where
        T: Queryable,
    {
        ListQueryEngine::new(T::field_accessors())
    }

    /// Returns the accessor table.
    pub fn accessors(&self) -> &FieldAccessors<T> {
        &self.accessors
    }

    /// Runs `query` over `records`. See [`execute`].
    pub fn execute<'r>(&self, records: &'r [T], query: &Query<T>) -> Result<QueryResult<&'r T>> {
        execute(records, &self.accessors, query)
    }
}

impl<T: Queryable> Default for ListQueryEngine<T> {
    fn default() -> Self {
        ListQueryEngine::for_queryable()
    }
}
