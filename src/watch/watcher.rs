// src/watch/watcher.rs

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::{Result, StylepipeError};
use crate::pipeline::WatchBinding;
use crate::watch::event_handler::classify_event;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping the handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `binding.dir` recursively and send a
/// [`RuntimeEvent::SourceChanged`] for every notification that touches a
/// watched path.
///
/// - `root` is the project root the watch globs are relative to.
/// - `runtime_tx` is the channel into the watch runtime.
///
/// The watcher stays attached for the whole session; nothing is respawned
/// between runs and no debouncing is applied.
pub fn spawn_watcher(
    binding: &WatchBinding,
    root: &Path,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    if !binding.dir.is_dir() {
        return Err(StylepipeError::MissingInput(binding.dir.clone()));
    }

    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let watch_dir = binding
        .dir
        .canonicalize()
        .unwrap_or_else(|_| binding.dir.clone());
    let profile = Arc::new(binding.profile.clone());

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // The tracing subscriber may already be gone here.
                    eprintln!("stylepipe: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("stylepipe: file watch error: {err}");
            }
        },
        Config::default(),
    )
    .context("creating file watcher")?;

    watcher
        .watch(&watch_dir, RecursiveMode::Recursive)
        .with_context(|| format!("watching {}", watch_dir.display()))?;

    info!(
        dir = %watch_dir.display(),
        patterns = ?profile.patterns(),
        "file watcher started"
    );

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            let Some(runtime_event) = classify_event(&root, &profile, &event) else {
                continue;
            };

            if let Err(err) = runtime_tx.send(runtime_event).await {
                warn!("watch runtime is gone; stopping watcher loop: {err}");
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
