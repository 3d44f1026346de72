//! Query builder.
//!
//! A [`Query`] describes one list request: a free-text search, predicates,
//! a sort and a page. Builder methods consume `self`, so a query is immutable
//! once handed to the engine; callers build a fresh one per interaction.

use std::cmp::Ordering;
use std::fmt;

use crate::op::Op;
use crate::ordering::{Dir, SortSpec};
use crate::page::PageRequest;
use crate::predicate::{Operand, Predicate};
use crate::traits::Queryable;
use crate::value::TimeRange;

/// A declarative list request over records of type `T`.
///
/// # Example
///
/// ```
/// use consulta_query::{Dir, Query};
///
/// # struct Therapist;
/// let query: Query<Therapist> = Query::new()
///     .search("ansiedad")
///     .search_in(["name", "specialties"])
///     .and_includes_any("modalities", ["Online"])
///     .and_gte("rating", 4.5)
///     .order_by("price", Dir::Asc)
///     .page(1, 6)
///     .build();
///
/// assert_eq!(query.predicates().len(), 2);
/// assert_eq!(query.page_request().size, 6);
/// ```
pub struct Query<T> {
    search_term: String,
    search_fields: Vec<String>,
    predicates: Vec<Predicate>,
    sort: Option<SortSpec<T>>,
    page: PageRequest,
}

impl<T> Query<T> {
    /// Creates an empty query: no search, no predicates, source order, one
    /// unbounded page.
    pub fn new() -> Self {
        Query {
            search_term: String::new(),
            search_fields: Vec::new(),
            predicates: Vec::new(),
            sort: None,
            page: PageRequest::all(),
        }
    }

    /// Creates an empty query searching `T`'s default searchable fields.
    pub fn for_queryable() -> Self
    where
        T: Queryable,
    {
        Query::new().search_in(T::searchable_fields().iter().copied())
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Sets the fields the search term is matched against.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Adds a predicate. All predicates must hold.
    pub fn and(mut self, field: &str, op: Op, operand: impl Into<Operand>) -> Self {
        self.predicates.push(Predicate::new(field, op, operand));
        self
    }

    /// Adds an equality predicate.
    pub fn and_eq(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Equals, operand)
    }

    /// Adds an "includes any of" predicate.
    pub fn and_includes_any<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.and(field, Op::IncludesAny, Operand::set(values))
    }

    /// Adds an inclusive lower bound.
    pub fn and_gte(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Gte, operand)
    }

    /// Adds an inclusive upper bound.
    pub fn and_lte(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Lte, operand)
    }

    /// Adds an inclusive `[min, max]` bound as two predicates.
    pub fn and_between(
        self,
        field: &str,
        min: impl Into<Operand>,
        max: impl Into<Operand>,
    ) -> Self {
        self.and_gte(field, min).and_lte(field, max)
    }

    /// Adds a range-overlap predicate.
    pub fn and_overlaps(self, field: &str, range: TimeRange) -> Self {
        self.and(field, Op::RangeOverlap, range)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts by a field's value. Replaces any previous sort.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some(SortSpec::new(field, dir));
        self
    }

    /// Sorts ascending by a field's value.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by a field's value.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Sorts with a custom record comparator, reported under `field`.
    ///
    /// `dir` is applied to the comparator's result.
    pub fn order_with<F>(mut self, field: &str, dir: Dir, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sort = Some(SortSpec::with_comparator(field, dir, comparator));
        self
    }

    /// Sets the sort from a prepared spec.
    pub fn sort(mut self, spec: SortSpec<T>) -> Self {
        self.sort = Some(spec);
        self
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Requests page `index` (1-based) of `size` items; `size == 0` disables
    /// pagination.
    pub fn page(mut self, index: usize, size: usize) -> Self {
        self.page = PageRequest::new(index, size);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the raw search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the searchable fields.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Returns the predicates, in the order they were added.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns the sort, if any.
    pub fn sort_spec(&self) -> Option<&SortSpec<T>> {
        self.sort.as_ref()
    }

    /// Returns the page request.
    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    /// Returns `true` if the filter stage passes every record.
    pub fn is_unfiltered(&self) -> bool {
        crate::search::needle(&self.search_term).is_none() && self.predicates.is_empty()
    }

    /// Every field name this query reads, in reference order: searchable
    /// fields, then predicate fields, then the sort field. May repeat.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.search_fields
            .iter()
            .map(String::as_str)
            .chain(self.predicates.iter().map(|p| p.field.as_str()))
            .chain(self.sort.iter().map(|s| s.field.as_str()))
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Query::new()
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query {
            search_term: self.search_term.clone(),
            search_fields: self.search_fields.clone(),
            predicates: self.predicates.clone(),
            sort: self.sort.clone(),
            page: self.page,
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("search_term", &self.search_term)
            .field("search_fields", &self.search_fields)
            .field("predicates", &self.predicates)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .finish()
    }
}
