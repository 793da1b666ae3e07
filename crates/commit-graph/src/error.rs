use thiserror::Error;

/// Error types for the commit graph layout engine
///
/// The taxonomy is narrow on purpose: the layout algorithm is total over any
/// DAG fragment, including windows whose parents are only partially loaded.
/// Only structurally invalid input aborts a pass; unknown-id lookups and
/// superseded passes are ordinary conditions, not errors.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Commit '{id}' lists itself as a parent")]
    SelfParent { id: String },

    #[error("Duplicate commit id '{id}' in commit window")]
    DuplicateCommit { id: String },

    #[error("Parent cycle detected involving commit '{id}'")]
    CycleDetected { id: String },

    #[error("Invalid commit graph: {message}")]
    InvalidGraph { message: String },

    #[error("Commit source failed: {message}")]
    Source { message: String },

    #[error("No commit source configured for this coordinator")]
    NoSource,
}

/// Result type alias for graph layout operations
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a new InvalidGraph error
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::InvalidGraph {
            message: message.into(),
        }
    }

    /// Create a new Source error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}
