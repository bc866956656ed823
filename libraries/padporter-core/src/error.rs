/// Errors surfaced by source providers
use thiserror::Error;

/// Error type for `SourceProvider` implementations
///
/// Providers translate transport-specific failures (filesystem errno,
/// protocol faults) into these variants; the orchestrator decides scope
/// (run, subtree, or file) from where the error occurred, not from the
/// variant.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Path does not exist on the source
    #[error("Source path not found: {0}")]
    NotFound(String),

    /// Listing or reading was denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Expected a directory, found something else
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Remote session is not established or was lost
    #[error("Session error: {0}")]
    Session(String),

    /// Transport-level protocol failure
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
