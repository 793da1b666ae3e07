use crate::commit::CommitInfo;
use crate::error::GraphResult;
use crate::lanes::LaneAllocator;
use crate::nodes::NodeStore;
use crate::table::GraphTable;

/// Run one full layout pass over a commit window
///
/// Node store build, lane assignment and table construction as one logical
/// unit. Pure and synchronous; nothing is published here, so a failed pass
/// leaves whatever table the caller had untouched.
pub fn compute_layout(commits: &[CommitInfo]) -> GraphResult<GraphTable> {
    let store = NodeStore::build(commits)?;
    let assignment = LaneAllocator::assign(commits, &store);

    tracing::debug!(
        commits = commits.len(),
        lanes = assignment.lanes.len(),
        highest_tag = assignment.highest_tag,
        "layout pass complete"
    );

    Ok(GraphTable::new(assignment.tags, assignment.highest_tag))
}
