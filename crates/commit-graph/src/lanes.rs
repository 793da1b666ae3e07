use std::collections::HashMap;

use crate::commit::CommitInfo;
use crate::nodes::NodeStore;

/// Where a lane stops occupying its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneEnd {
    /// The lane has claimed the commit at this index and continues there
    /// when the pass reaches it.
    Open(usize),
    /// The lane terminates at this index: its commit is a root, or its
    /// primary parent is already claimed by a nearer descendant. The column
    /// stays occupied through this row and frees below it.
    Closed(usize),
    /// The closing commit lies outside the loaded window; the lane stays
    /// occupied for the rest of the pass. A legitimate steady state while
    /// history is paginated, resolved by a full re-run on a larger window.
    Indeterminate,
}

/// One vertical column of the rendered graph
#[derive(Debug, Clone)]
pub struct Lane {
    /// Column index assigned to every commit on this lane
    pub number: u32,
    /// Display index where the lane started
    pub open_from: usize,
    /// Where the lane ends, if known
    pub end: LaneEnd,
    /// Commit ids running through this lane, in display order
    pub member_ids: Vec<String>,
}

impl Lane {
    /// Whether this lane's number is in use at the given display index
    pub fn is_active_at(&self, index: usize) -> bool {
        if self.open_from > index {
            return false;
        }
        match self.end {
            LaneEnd::Indeterminate => true,
            LaneEnd::Open(until) | LaneEnd::Closed(until) => until >= index,
        }
    }
}

/// Result of one allocator pass
#[derive(Debug)]
pub struct LaneAssignment {
    /// Lane number per commit id
    pub tags: HashMap<String, u32>,
    /// Maximum lane number assigned across the pass
    pub highest_tag: u32,
    /// All lanes opened during the pass, including indeterminate ones
    pub lanes: Vec<Lane>,
}

/// The core layout algorithm: a single forward pass over the display order
///
/// Each commit either continues the lane that claimed it (the lane of the
/// nearest descendant that lists it as primary parent) or opens a new lane
/// numbered with the smallest non-negative integer not active at its row.
/// Secondary parents of merge commits never extend a lane; their connectors
/// are a rendering concern.
pub struct LaneAllocator;

impl LaneAllocator {
    /// Assign a lane number to every commit in the window
    ///
    /// Total over any DAG fragment: parents outside the window leave their
    /// lane indeterminate rather than failing. The pass must run over the
    /// same display order the node store was built from.
    pub fn assign(commits: &[CommitInfo], store: &NodeStore) -> LaneAssignment {
        let mut lanes: Vec<Lane> = Vec::new();
        // Display index of a claimed primary parent -> lane continuing there.
        // First claimant wins; that is always the nearest descendant because
        // the pass runs newest to oldest.
        let mut claims: HashMap<usize, usize> = HashMap::new();
        let mut tags: HashMap<String, u32> = HashMap::with_capacity(commits.len());
        let mut highest_tag = 0u32;

        for (index, commit) in commits.iter().enumerate() {
            let slot = match claims.remove(&index) {
                Some(slot) => slot,
                None => {
                    let number = smallest_free_number(&lanes, index);
                    lanes.push(Lane {
                        number,
                        open_from: index,
                        end: LaneEnd::Closed(index),
                        member_ids: Vec::new(),
                    });
                    lanes.len() - 1
                }
            };

            lanes[slot].member_ids.push(commit.id.clone());
            tags.insert(commit.id.clone(), lanes[slot].number);
            highest_tag = highest_tag.max(lanes[slot].number);

            lanes[slot].end = match commit.primary_parent() {
                None => LaneEnd::Closed(index),
                Some(parent_id) => match store.index_of(parent_id) {
                    // The window is only reverse-chronological per call, not
                    // topological; a parent listed above its child already
                    // has its own lane and cannot be continued into.
                    Some(parent_index) if parent_index <= index => LaneEnd::Closed(index),
                    Some(parent_index) => {
                        if claims.contains_key(&parent_index) {
                            // A nearer descendant owns the parent. The column
                            // still runs down to the parent's row so the
                            // connector has room, then frees.
                            LaneEnd::Closed(parent_index)
                        } else {
                            claims.insert(parent_index, slot);
                            LaneEnd::Open(parent_index)
                        }
                    }
                    None => LaneEnd::Indeterminate,
                },
            };
        }

        LaneAssignment {
            tags,
            highest_tag,
            lanes,
        }
    }
}

/// Smallest non-negative integer not used by any lane active at `index`
fn smallest_free_number(lanes: &[Lane], index: usize) -> u32 {
    let active: Vec<u32> = lanes
        .iter()
        .filter(|lane| lane.is_active_at(index))
        .map(|lane| lane.number)
        .collect();

    let mut number = 0u32;
    while active.contains(&number) {
        number += 1;
    }
    number
}
