//! Error types for the mirror run
//!
//! Only run-level faults surface as `MirrorError`; directory- and
//! file-level problems are consumed by the orchestrator, reported, and
//! tallied in the run summary.

use padporter_core::ProviderError;
use thiserror::Error;

/// Faults that abort a whole run before or during traversal
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The source root cannot be listed at all
    #[error("Cannot list source root '{path}': {source}")]
    SourceRoot {
        /// Provider-relative root path
        path: String,
        /// Underlying provider failure
        source: ProviderError,
    },

    /// The destination root cannot be created
    #[error("Cannot create destination root '{path}': {source}")]
    DestinationRoot {
        /// Destination root path
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The transient staging directory cannot be created
    #[error("Cannot create staging directory: {0}")]
    Staging(std::io::Error),
}
