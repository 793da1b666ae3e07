//! # Commit Graph
//!
//! Lane layout engine for the commit history view: given a commit window
//! ordered newest-first, assign every commit an integer lane (column) so
//! parent connectors can be drawn without overlap, reusing lane numbers as
//! soon as they free up to keep the rendered graph narrow.
//!
//! ## Features
//!
//! - **Node Store**: window-restricted parent/child graph with id-keyed
//!   lookup, built once per pass
//! - **Lane Allocator**: smallest-free-number lane assignment with
//!   primary-parent lane continuation and first-claimant ownership
//! - **Graph Table**: immutable per-pass result, swapped in atomically so
//!   the renderer never sees a half-built mapping
//! - **Layout Coordinator**: background worker that coalesces rerun
//!   requests, last request wins
//!
//! Partial windows are a normal state: a parent outside the loaded window
//! leaves its lane indeterminate, and growing the window triggers a full
//! recompute rather than an incremental patch.
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_graph::{compute_layout, CommitInfo};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Newest first; parents[0] is the primary parent.
//! let commits = vec![
//!     CommitInfo::new("c3", vec!["c2".to_string()]),
//!     CommitInfo::new("c2", vec!["c1".to_string()]),
//!     CommitInfo::new("c1", vec![]),
//! ];
//!
//! let table = compute_layout(&commits)?;
//! assert_eq!(table.tag("c3"), Some(0));
//! assert_eq!(table.highest_tag(), 0);
//! assert_eq!(table.tag("not-loaded-yet"), None);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Background layout
//!
//! ```rust,no_run
//! use commit_graph::{CommitInfo, LayoutCoordinator};
//!
//! # async fn example() {
//! let coordinator = LayoutCoordinator::new();
//! let graph = coordinator.graph();
//!
//! // UI thread: hand over the latest window whenever history changes.
//! coordinator.submit(vec![CommitInfo::new("c1", vec![])]);
//!
//! // Render thread: query the published table every frame.
//! let lane = graph.tag("c1");
//! let width = graph.highest_tag() + 1;
//! # let _ = (lane, width);
//! # }
//! ```

pub mod commit;
pub mod coordinator;
pub mod error;
pub mod lanes;
pub mod layout;
pub mod nodes;
pub mod table;

// Re-export the most commonly used types for easy access
pub use error::{GraphError, GraphResult};

pub use commit::CommitInfo;
pub use coordinator::{CommitSource, LayoutCoordinator, DEFAULT_PAGE_SIZE};
pub use lanes::{Lane, LaneAllocator, LaneAssignment, LaneEnd};
pub use layout::compute_layout;
pub use nodes::{Node, NodeStore};
pub use table::{GraphHandle, GraphTable};
