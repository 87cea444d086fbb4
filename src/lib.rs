// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. storage::StorageError)
    clippy::module_name_repetitions
)]

//! # Splitpad
//!
//! The core of a two-panel text utility: text goes in on the left, a
//! formatted result comes out on the right.
//!
//! Splitpad provides:
//! - Text statistics (words, characters, lines, sentences, reading time)
//! - JSON pretty-printing and HTML whitespace normalization
//! - A single application store with validated mutators
//! - Best-effort persistence of input, format, theme, layout and config
//! - Self-expiring notifications
//!
//! ## Architecture
//!
//! Splitpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Accepted state changes
//! - **Update**: Pure state transitions
//! - **Store**: Runs side effects for applied messages
//!
//! ## Modules
//!
//! - [`analysis`]: Text statistics
//! - [`format`]: Result formatting
//! - [`app`]: Application state, store and notifications
//! - [`storage`]: Key/value persistence backends
//! - [`config`]: User configuration and the settings form
//! - [`clipboard`]: System clipboard reads

pub mod analysis;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod format;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{AnalysisReport, InputStats, analyze};
    pub use crate::app::{Message, Model, NotificationKind, Outcome, Store, Theme, update};
    pub use crate::format::{FormattedResult, ResultFormat, format_result};
    pub use crate::storage::{FileStore, MemoryStore, Persistence};
}
