use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::commit::CommitInfo;
use crate::error::{GraphError, GraphResult};

/// A commit's connectivity within the loaded window
///
/// Edges are display-order indices and only exist for commits that are
/// present in the window. A parent id pointing outside the window never
/// materializes as a node; it stays an id on the owning [`CommitInfo`].
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Indices of parents present in the window
    pub parents: Vec<usize>,
    /// Indices of children present in the window; back-references used for
    /// lookup only
    pub children: Vec<usize>,
}

/// Graph built once per layout pass from a flat commit window
///
/// Lookups are id-keyed through an [`IndexMap`] whose insertion order is the
/// display order, so both `id -> index` and `index -> node` resolve in O(1).
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: IndexMap<String, Node>,
}

impl NodeStore {
    /// Build the node store from a commit window in display order
    ///
    /// Fails fast on structurally invalid input: a duplicate commit id, a
    /// commit listing itself as a parent, or a parent cycle among in-window
    /// commits. Parents outside the window are skipped, not errors.
    pub fn build(commits: &[CommitInfo]) -> GraphResult<Self> {
        let mut nodes: IndexMap<String, Node> = IndexMap::with_capacity(commits.len());

        for commit in commits {
            if nodes.insert(commit.id.clone(), Node::default()).is_some() {
                return Err(GraphError::DuplicateCommit {
                    id: commit.id.clone(),
                });
            }
        }

        for (index, commit) in commits.iter().enumerate() {
            for parent_id in &commit.parents {
                if *parent_id == commit.id {
                    return Err(GraphError::SelfParent {
                        id: commit.id.clone(),
                    });
                }
                let Some(parent_index) = nodes.get_index_of(parent_id.as_str()) else {
                    continue;
                };
                nodes[index].parents.push(parent_index);
                nodes[parent_index].children.push(index);
            }
        }

        let store = Self { nodes };
        store.check_acyclic()?;
        Ok(store)
    }

    /// Number of commits in the window
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Display-order index of a commit id, if it is in the window
    pub fn index_of(&self, commit_id: &str) -> Option<usize> {
        self.nodes.get_index_of(commit_id)
    }

    /// Commit id at a display-order index
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(|(id, _)| id.as_str())
    }

    /// Node at a display-order index
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    /// Whether the commit at `index` has no parents in the window
    pub fn is_root(&self, index: usize) -> bool {
        self.node(index).is_some_and(|n| n.parents.is_empty())
    }

    /// Whether the commit at `index` has no children in the window, i.e. it
    /// is the newest known commit of its chain
    pub fn is_tip(&self, index: usize) -> bool {
        self.node(index).is_some_and(|n| n.children.is_empty())
    }

    /// Kahn-style peel over the in-window edges; anything left unpeeled sits
    /// on a cycle.
    fn check_acyclic(&self) -> GraphResult<()> {
        let mut remaining_children: Vec<usize> =
            self.nodes.values().map(|n| n.children.len()).collect();
        let mut queue: VecDeque<usize> = remaining_children
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(index, _)| index)
            .collect();

        let mut peeled = 0usize;
        while let Some(index) = queue.pop_front() {
            peeled += 1;
            for &parent in &self.nodes[index].parents {
                remaining_children[parent] -= 1;
                if remaining_children[parent] == 0 {
                    queue.push_back(parent);
                }
            }
        }

        if peeled < self.nodes.len() {
            let id = remaining_children
                .iter()
                .position(|count| *count > 0)
                .and_then(|index| self.id_at(index))
                .unwrap_or_default()
                .to_string();
            return Err(GraphError::CycleDetected { id });
        }
        Ok(())
    }
}
