use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::commit::CommitInfo;
use crate::error::{GraphError, GraphResult};
use crate::layout::compute_layout;
use crate::table::GraphHandle;

/// Default number of commits fetched per history page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Upstream provider of commit windows
///
/// The contract: each call returns up to `limit` commits ordered newest
/// first. Completeness is not guaranteed; parents of a returned commit may be
/// absent when the caller requested a windowed view.
///
/// # Examples
/// ```rust
/// use commit_graph::{CommitInfo, CommitSource};
///
/// struct FixedHistory(Vec<CommitInfo>);
///
/// #[async_trait::async_trait]
/// impl CommitSource for FixedHistory {
///     async fn fetch(
///         &self,
///         limit: usize,
///     ) -> Result<Vec<CommitInfo>, Box<dyn std::error::Error + Send + Sync>> {
///         Ok(self.0.iter().take(limit).cloned().collect())
///     }
/// }
/// ```
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetch up to `limit` commits, newest first
    async fn fetch(
        &self,
        limit: usize,
    ) -> Result<Vec<CommitInfo>, Box<dyn std::error::Error + Send + Sync>>;
}

type Window = Option<Arc<[CommitInfo]>>;

/// Serializes layout passes and publishes their results
///
/// Every trigger (initial load, pagination, full refresh) hands the latest
/// commit window to a single background worker, which runs node store build,
/// lane assignment and table publication as one unit. The window channel
/// holds at most the newest pending request, so reruns coalesce instead of
/// piling up; a pass that finds a newer window pending discards its result
/// without publishing.
pub struct LayoutCoordinator {
    handle: GraphHandle,
    sender: watch::Sender<Window>,
    worker: JoinHandle<()>,
    passes: Arc<Notify>,
    source: Option<Arc<dyn CommitSource>>,
    page_size: usize,
    window_len: AtomicUsize,
}

impl LayoutCoordinator {
    /// Create a coordinator fed only through [`submit`](Self::submit)
    pub fn new() -> Self {
        Self::spawn(None, DEFAULT_PAGE_SIZE)
    }

    /// Create a coordinator that pages history in from a [`CommitSource`]
    pub fn with_source(source: Arc<dyn CommitSource>, page_size: usize) -> Self {
        Self::spawn(Some(source), page_size.max(1))
    }

    fn spawn(source: Option<Arc<dyn CommitSource>>, page_size: usize) -> Self {
        let handle = GraphHandle::new();
        let passes = Arc::new(Notify::new());
        let (sender, mut receiver) = watch::channel::<Window>(None);

        let worker_handle = handle.clone();
        let worker_passes = Arc::clone(&passes);
        let worker = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let window = receiver.borrow_and_update().clone();
                let Some(window) = window else { continue };

                match compute_layout(&window) {
                    Ok(table) => {
                        if receiver.has_changed().unwrap_or(false) {
                            // A newer window arrived while this pass ran.
                            tracing::debug!(
                                commits = window.len(),
                                "layout pass superseded; discarding result"
                            );
                        } else {
                            worker_handle.publish(table);
                            tracing::debug!(
                                commits = window.len(),
                                generation = worker_handle.generation(),
                                "graph table published"
                            );
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            "layout pass failed; keeping last published table"
                        );
                    }
                }
                worker_passes.notify_one();
            }
        });

        Self {
            handle,
            sender,
            worker,
            passes,
            source,
            page_size,
            window_len: AtomicUsize::new(0),
        }
    }

    /// Reader handle for the published graph table
    ///
    /// Cheap to clone and safe to query from the render thread while passes
    /// run in the background.
    pub fn graph(&self) -> GraphHandle {
        self.handle.clone()
    }

    /// Number of commits in the most recently submitted window
    pub fn window_len(&self) -> usize {
        self.window_len.load(Ordering::Acquire)
    }

    /// Hand a new commit window to the layout worker
    ///
    /// The channel keeps only the newest undelivered window, so a burst of
    /// submissions collapses to a single pass over the last one.
    pub fn submit(&self, commits: Vec<CommitInfo>) {
        self.window_len.store(commits.len(), Ordering::Release);
        let _ = self.sender.send(Some(Arc::from(commits)));
    }

    /// Fetch the first page of history and lay it out
    pub async fn load_initial(&self) -> GraphResult<usize> {
        self.request(self.page_size).await
    }

    /// Grow the window by one page and rerun the layout
    ///
    /// A full recompute over the larger window, not an incremental patch;
    /// lanes left indeterminate by the previous window resolve here if their
    /// parents are now loaded.
    pub async fn load_more(&self) -> GraphResult<usize> {
        self.request(self.window_len() + self.page_size).await
    }

    /// Refetch the current window after a repository-changing operation
    pub async fn refresh(&self) -> GraphResult<usize> {
        self.request(self.window_len().max(self.page_size)).await
    }

    async fn request(&self, limit: usize) -> GraphResult<usize> {
        let source = self.source.as_ref().ok_or(GraphError::NoSource)?;
        let commits = source
            .fetch(limit)
            .await
            .map_err(|err| GraphError::source(err.to_string()))?;
        let fetched = commits.len();
        self.submit(commits);
        Ok(fetched)
    }

    /// Wait until the worker finishes its next pass
    ///
    /// Completion covers all three outcomes: published, superseded, or
    /// aborted on malformed input.
    pub async fn await_pass(&self) {
        self.passes.notified().await;
    }

    /// Stop the worker and wait for it to wind down
    ///
    /// Dropping the coordinator also stops the worker; this variant just
    /// makes the teardown observable.
    pub async fn shutdown(self) {
        drop(self.sender);
        let _ = self.worker.await;
    }
}

impl Default for LayoutCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
