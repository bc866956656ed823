/// Capability traits implemented outside the core
use crate::error::ProviderError;
use crate::types::SourceEntry;
use std::path::PathBuf;

/// Access to a source tree: list directories, fetch file bytes
///
/// Two realizations exist: direct local filesystem access and a
/// remote-share adapter. The orchestrator never touches a transport
/// directly; everything flows through this trait.
///
/// Listing order is not guaranteed. Callers that need stable output
/// naming must sort entries themselves before assigning counters.
pub trait SourceProvider {
    /// List the entries directly under `path`
    ///
    /// May surface the `.`/`..` pseudo-entries; callers are expected to
    /// skip them.
    fn list(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError>;

    /// Fetch the raw bytes of the file at `path`
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ProviderError>;

    /// Absolute local path for `path`, if the provider is backed by the
    /// local filesystem
    ///
    /// When this returns `Some`, callers may read the file in place and
    /// skip the transient staging copy a `fetch` would require.
    fn local_path(&self, _path: &str) -> Option<PathBuf> {
        None
    }
}
