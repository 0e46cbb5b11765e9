//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServiceConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServiceConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServiceConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    handle_event(&path, &event, &tx);
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Reload `path` when `event` modified or created it. Returns true when a new
/// config was sent.
fn handle_event(
    path: &Path,
    event: &Event,
    tx: &mpsc::UnboundedSender<ServiceConfig>,
) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }

    tracing::info!(path = ?path, "Config file change detected, reloading");
    match load_config(path) {
        Ok(new_config) => tx.send(new_config).is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &Path) -> Event {
        Event::new(kind).add_path(path.to_path_buf())
    }

    #[test]
    fn test_modify_event_sends_new_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "[[routes]]\ntype = \"mounted\"\npath = \"/teams\"\n",
        )
        .unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(file.path());
        let sent = handle_event(
            file.path(),
            &event(EventKind::Modify(ModifyKind::Any), file.path()),
            &watcher.update_tx,
        );

        assert!(sent);
        let config = rx.try_recv().unwrap();
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_not_sent() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[timeouts]\nrequest_secs = 0\n").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(file.path());
        let sent = handle_event(
            file.path(),
            &event(EventKind::Create(CreateKind::File), file.path()),
            &watcher.update_tx,
        );

        assert!(!sent);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_remove_event_is_ignored() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let sent = handle_event(
            file.path(),
            &event(EventKind::Remove(RemoveKind::File), file.path()),
            &watcher.update_tx,
        );

        assert!(!sent);
        assert!(rx.try_recv().is_err());
    }
}
