//! Line table error types.

/// Errors raised while loading or validating a line table.
#[derive(Debug, thiserror::Error)]
pub enum LineTableError {
    /// The table file could not be read
    #[error("failed to read line table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The table is not valid JSON for the expected shape
    #[error("line table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The trolley prefix must be exactly one character
    #[error("trolley prefix must be a single character, got {0:?}")]
    InvalidPrefix(String),

    /// Two entries share an application name
    #[error("duplicate line name: {0}")]
    DuplicateName(String),

    /// Two application names map to the same upstream name
    #[error("upstream name {upstream} is claimed by both {first} and {second}")]
    DuplicateUpstream {
        upstream: String,
        first: String,
        second: String,
    },
}
