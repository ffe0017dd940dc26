//! Directory-backed registry with atomic writes.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::fetch::FetchBytes;
use crate::task::Task;

use super::TaskRegistry;

/// Stores each task at `<root>/<task.filename>`.
///
/// Text tasks (stylesheets) are written as-is; binary tasks are downloaded
/// through `fetcher` first. Files appear atomically: the payload goes to a
/// temp file in the destination folder which is then renamed into place.
pub struct DirRegistry<B> {
    root: PathBuf,
    fetcher: B,
}

impl<B: FetchBytes> DirRegistry<B> {
    pub fn new(root: impl Into<PathBuf>, fetcher: B) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn persist_task(&self, task: &Task) -> Result<PathBuf> {
        let dest = destination(&self.root, &task.filename)?;
        let payload = match &task.text {
            Some(text) => text.clone().into_bytes(),
            None => self
                .fetcher
                .fetch_bytes(&task.url)
                .await
                .with_context(|| format!("fetch {}", task.url))?,
        };
        let path = dest.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &payload))
            .await
            .context("write task join")??;
        tracing::debug!(url = %task.url, path = %dest.display(), "task persisted");
        Ok(dest)
    }
}

impl<B: FetchBytes> TaskRegistry for DirRegistry<B> {
    fn persist<'a>(&'a self, task: &'a Task) -> BoxFuture<'a, Result<PathBuf>> {
        Box::pin(self.persist_task(task))
    }
}

/// Joins `filename` onto `root`, refusing absolute paths and `..` components.
fn destination(root: &Path, filename: &str) -> Result<PathBuf> {
    let rel = Path::new(filename);
    if filename.is_empty() {
        anyhow::bail!("task has an empty filename");
    }
    for component in rel.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => anyhow::bail!("task filename escapes the registry root: {filename}"),
        }
    }
    Ok(root.join(rel))
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;
    std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("temp file in {}", parent.display()))?;
    tmp.write_all(payload)?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::registry::persist_all;

    fn task(url: &str, filename: &str, text: Option<&str>) -> Task {
        Task {
            url: url.to_string(),
            filename: filename.to_string(),
            mime_type: "text/css".to_string(),
            text: text.map(String::from),
        }
    }

    #[test]
    fn destination_rejects_escapes() {
        let root = Path::new("/tmp/root");
        assert!(destination(root, "assets/a.css").is_ok());
        assert!(destination(root, "../a.css").is_err());
        assert!(destination(root, "/etc/passwd").is_err());
        assert!(destination(root, "").is_err());
    }

    #[tokio::test]
    async fn writes_text_and_binary_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MemoryFetcher::new().with("https://a.org/f.woff", vec![0u8, 1, 2, 3]);
        let registry = DirRegistry::new(dir.path(), fetcher);

        let tasks = [
            task("https://a.org/a.css", "assets/001-1.css", Some(".a{}")),
            task("https://a.org/f.woff", "assets/001-2.woff", None),
        ];
        let summary = persist_all(&registry, &tasks).await;
        assert!(summary.failed.is_empty());
        assert_eq!(summary.saved.len(), 2);
        assert_eq!(summary.saved[0], registry.root().join("assets/001-1.css"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("assets/001-1.css")).unwrap(),
            ".a{}"
        );
        assert_eq!(
            std::fs::read(dir.path().join("assets/001-2.woff")).unwrap(),
            [0u8, 1, 2, 3]
        );
    }

    #[tokio::test]
    async fn failed_download_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DirRegistry::new(dir.path(), MemoryFetcher::new());
        let tasks = [
            task("https://a.org/missing.png", "assets/001-1.png", None),
            task("https://a.org/b.css", "assets/001-2.css", Some("b{}")),
        ];
        let summary = persist_all(&registry, &tasks).await;
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "https://a.org/missing.png");
        assert_eq!(summary.saved.len(), 1);
        assert!(dir.path().join("assets/001-2.css").exists());
    }
}
