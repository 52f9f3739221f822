// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the `[watch]` globs (`patterns.rs`).
//! - Deciding which filesystem notifications count as source changes
//!   (`event_handler.rs`).
//! - Wiring up a cross-platform recursive watcher with `notify`
//!   (`watcher.rs`).
//!
//! It does **not** know about stages; it only turns filesystem changes
//! into [`RuntimeEvent::SourceChanged`](crate::engine::RuntimeEvent).

pub mod event_handler;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use event_handler::{classify_event, is_relevant_kind};
pub use patterns::WatchProfile;
pub use watcher::{WatcherHandle, spawn_watcher};
