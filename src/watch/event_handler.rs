// src/watch/event_handler.rs

//! Turning raw `notify` events into runtime events.

use std::path::Path;

use notify::event::ModifyKind;
use notify::{Event, EventKind};
use tracing::{trace, warn};

use crate::engine::RuntimeEvent;
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::WatchProfile;

/// Whether an event kind can change what the compiler would read.
///
/// Reads and metadata-only changes (permissions, timestamps) are ignored.
/// Backends that cannot tell what happened report `Any`, which counts.
pub fn is_relevant_kind(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(_) | EventKind::Other => false,
    }
}

/// Map one notification to at most one [`RuntimeEvent`].
///
/// One notification becomes one `SourceChanged`, however many of its paths
/// match, so each modification event causes exactly one re-run.
pub fn classify_event(root: &Path, profile: &WatchProfile, event: &Event) -> Option<RuntimeEvent> {
    if !is_relevant_kind(&event.kind) {
        trace!(kind = ?event.kind, "ignoring event kind");
        return None;
    }

    let mut paths: Vec<String> = Vec::new();
    for path in &event.paths {
        let Some(rel) = relative_str(root, path) else {
            warn!("could not relativize path {:?} against root {:?}", path, root);
            continue;
        };
        if profile.matches(&rel) && !paths.contains(&rel) {
            paths.push(rel);
        }
    }

    if paths.is_empty() {
        None
    } else {
        Some(RuntimeEvent::SourceChanged { paths })
    }
}
