/// Convenience result type used across adgraph.
pub type AdGraphResult<T> = Result<T, AdGraphError>;

/// Top-level error taxonomy used by the graph model APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdGraphError {
    /// A record field list cannot be turned into a star graph.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Two parallel inputs (graphs and cluster centers) differ in length.
    #[error("arity mismatch: expected {expected} cluster centers, got {actual}")]
    ArityMismatch {
        /// Number of graphs supplied.
        expected: usize,
        /// Number of cluster centers supplied.
        actual: usize,
    },

    /// An operation that needs at least one graph was given none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Invalid caller-provided data (stale match sets, bad geometry, bad config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdGraphError {
    /// Build a [`AdGraphError::MalformedRecord`] value.
    pub fn malformed_record(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Build a [`AdGraphError::ArityMismatch`] value.
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    /// Build a [`AdGraphError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`AdGraphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AdGraphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AdGraphError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
