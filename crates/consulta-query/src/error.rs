//! Error types for the query engine.

use thiserror::Error;

/// Errors raised when executing a query.
///
/// Degenerate inputs (empty collections, out-of-range pages, empty search
/// terms) are not errors; they produce well-formed empty results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query names fields the accessor table does not know.
    ///
    /// This is an integration bug in the caller's accessor table, not a
    /// runtime condition; it is not retryable.
    #[error("no field accessor registered for: {}", fields.join(", "))]
    MissingAccessor {
        /// Every unresolvable field, in order of first reference.
        fields: Vec<String>,
    },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
