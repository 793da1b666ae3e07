use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit as delivered by the history source
///
/// Commit windows arrive ordered newest-first (reverse chronological). The
/// window may be partial: parent ids can reference commits that are not part
/// of the current window, which the layout engine treats as a normal,
/// expected state while history is paginated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit hash
    pub id: String,
    /// Abbreviated hash for display
    pub short_id: String,
    /// Commit message (first line is the summary)
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub email: String,
    /// Author timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit ids; the first entry is the primary parent whose lane
    /// this commit continues
    pub parents: Vec<String>,
    /// Branch and tag names pointing at this commit
    pub branch_refs: Vec<String>,
}

impl CommitInfo {
    /// Create a commit with the given id and parents and empty metadata
    ///
    /// Display metadata (message, author, refs) does not influence layout,
    /// so callers that only need lane assignment can use this directly.
    pub fn new(id: impl Into<String>, parents: Vec<String>) -> Self {
        let id = id.into();
        let short_id = id.chars().take(7).collect();
        Self {
            id,
            short_id,
            message: String::new(),
            author: String::new(),
            email: String::new(),
            timestamp: Utc::now(),
            parents,
            branch_refs: Vec::new(),
        }
    }

    /// The primary parent, if the commit has any parents at all
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Whether this commit merges two or more parents
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
