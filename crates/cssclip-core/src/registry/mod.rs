//! Asset registry: turns capture tasks into persisted files.
//!
//! The capture core only produces [`Task`]s; a registry decides where and
//! how they are stored. [`DirRegistry`] writes them below a root directory.

mod dir;

pub use dir::DirRegistry;

use futures::future::BoxFuture;
use std::path::PathBuf;

use crate::task::Task;

/// Persists one task and returns where it ended up.
pub trait TaskRegistry: Send + Sync {
    fn persist<'a>(&'a self, task: &'a Task) -> BoxFuture<'a, anyhow::Result<PathBuf>>;
}

/// Outcome of [`persist_all`].
#[derive(Debug, Default)]
pub struct PersistSummary {
    pub saved: Vec<PathBuf>,
    /// `(url, error)` for every task that could not be stored.
    pub failed: Vec<(String, String)>,
}

/// Persists tasks one by one. A failed asset is logged and recorded but does
/// not stop the remaining tasks.
pub async fn persist_all<R>(registry: &R, tasks: &[Task]) -> PersistSummary
where
    R: TaskRegistry + ?Sized,
{
    let mut summary = PersistSummary::default();
    for task in tasks {
        match registry.persist(task).await {
            Ok(path) => summary.saved.push(path),
            Err(e) => {
                tracing::warn!(url = %task.url, filename = %task.filename, "persist failed: {e:#}");
                summary.failed.push((task.url.clone(), format!("{e:#}")));
            }
        }
    }
    summary
}
