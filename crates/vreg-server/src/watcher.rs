//! File watching for rebuilds.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A file under a component source directory changed
    SourceChanged(PathBuf),

    /// The registry configuration file was written, replaced or removed
    ConfigChanged(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceChanged(p) | Self::ConfigChanged(p) => p,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigChanged(_))
    }
}

/// What the watcher reports on.
#[derive(Debug, Default)]
struct WatchTargets {
    /// Source directories, as given and canonicalized
    sources: Vec<PathBuf>,

    /// File name of the config file inside its watched parent directory
    config_name: Option<OsString>,
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `source_dirs` recursively and `config_file` through its parent
    /// directory, so the file is seen even when an editor replaces it or it
    /// does not exist yet. Source directories that do not exist are skipped.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        source_dirs: &[PathBuf],
        config_file: &Path,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let mut targets = WatchTargets::default();

        for dir in source_dirs {
            if dir.is_dir() {
                watcher
                    .watch(dir, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
                targets.sources.push(dir.clone());
                if let Ok(canonical) = dir.canonicalize() {
                    targets.sources.push(canonical);
                }
            } else {
                tracing::debug!("Not watching missing directory {}", dir.display());
            }
        }

        let config_dir = match config_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if config_dir.is_dir() {
            if !source_dirs.iter().any(|dir| dir == config_dir) {
                watcher
                    .watch(config_dir, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            }
            targets.config_name = config_file.file_name().map(OsString::from);
        } else {
            tracing::debug!(
                "Not watching {}: {} is missing",
                config_file.display(),
                config_dir.display()
            );
        }

        std::thread::spawn(move || {
            let mut last_seen: HashMap<PathBuf, Instant> = HashMap::new();
            let debounce_duration = Duration::from_millis(100);

            while let Ok(event) = sync_rx.recv() {
                for path in event.paths {
                    let Some(e) = classify_event(&path, &event.kind, &targets) else {
                        continue;
                    };

                    // Debounce rapid events per path
                    let now = Instant::now();
                    if last_seen
                        .get(&path)
                        .is_some_and(|last| now.duration_since(*last) < debounce_duration)
                    {
                        continue;
                    }
                    last_seen.insert(path, now);

                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    targets: &WatchTargets,
) -> Option<WatchEvent> {
    use notify::EventKind;

    if !matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    if targets.config_name.is_some() && path.file_name() == targets.config_name.as_deref() {
        return Some(WatchEvent::ConfigChanged(path.to_path_buf()));
    }

    if targets.sources.iter().any(|dir| path.starts_with(dir)) {
        return Some(WatchEvent::SourceChanged(path.to_path_buf()));
    }

    None
}
