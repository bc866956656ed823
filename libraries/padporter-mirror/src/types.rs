//! Run configuration and summary types

use padporter_audio::ConvertConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a mirror run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MirrorConfig {
    /// Audio conversion settings
    pub convert: ConvertConfig,

    /// Sort listings lexicographically by raw name before assigning
    /// counters, so repeated runs over an unchanged source produce
    /// identical output names even when the provider enumerates in
    /// arbitrary order
    pub sort_listing: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            convert: ConvertConfig::default(),
            sort_listing: true,
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Traversal visited everything reachable
    Completed,

    /// Cancellation stopped the traversal early
    Cancelled,
}

/// Summary of one mirror run
///
/// Item-level problems accumulate here; only run-level faults surface
/// as errors instead of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files converted and written
    pub files_converted: usize,

    /// Files skipped for not being audio
    pub files_skipped: usize,

    /// Files that failed to fetch, decode, convert, or write
    pub files_failed: usize,

    /// Directories skipped together with their descendants
    pub subtrees_skipped: usize,

    /// Destination directories ensured
    pub directories_created: usize,

    /// How the run ended
    pub state: RunState,
}

impl RunSummary {
    pub(crate) fn new() -> Self {
        Self {
            files_converted: 0,
            files_skipped: 0,
            files_failed: 0,
            subtrees_skipped: 0,
            directories_created: 0,
            state: RunState::Completed,
        }
    }

    /// True when the run completed and nothing was lost
    pub fn success(&self) -> bool {
        self.state == RunState::Completed && self.files_failed == 0 && self.subtrees_skipped == 0
    }

    /// One-line human-readable summary
    pub fn summary_text(&self) -> String {
        format!(
            "{}: {} converted, {} skipped, {} failed, {} subtrees skipped",
            match self.state {
                RunState::Completed => "Completed",
                RunState::Cancelled => "Cancelled",
            },
            self.files_converted,
            self.files_skipped,
            self.files_failed,
            self.subtrees_skipped
        )
    }
}
