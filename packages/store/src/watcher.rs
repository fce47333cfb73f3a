use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Cannot watch {0}: no parent directory")]
    NoParent(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Reports writes to the site data file.
///
/// The parent directory is watched so the file can be replaced by rename.
pub struct DataWatcher {
    _watcher: RecommendedWatcher,
    receiver: UnboundedReceiver<notify::Result<Event>>,
    file_name: Option<std::ffi::OsString>,
}

impl DataWatcher {
    pub fn new(path: &Path) -> WatcherResult<Self> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => return Err(WatcherError::NoParent(path.to_path_buf())),
        };
        let (tx, rx) = unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file_name: path.file_name().map(|n| n.to_os_string()),
        })
    }

    fn concerns_file(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == self.file_name)
    }

    /// Wait for the next change to the data file.
    ///
    /// Returns `false` once the watcher has shut down.
    pub async fn changed(&mut self) -> bool {
        while let Some(result) = self.receiver.recv().await {
            match result {
                Ok(event) if self.concerns_file(&event) => return true,
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Watch error"),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_data_watcher() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_path = temp_dir.path().join("site.json");
        std::fs::write(&data_path, "{}").unwrap();

        let mut watcher = DataWatcher::new(&data_path).unwrap();

        let writer_path = data_path.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::fs::write(writer_path, "{\"home\": {}}").unwrap();
        });

        let changed = tokio::time::timeout(Duration::from_secs(5), watcher.changed()).await;
        assert!(matches!(changed, Ok(true)));
    }
}
