//! Source providers
//!
//! Transport-specific access to the source tree, behind the
//! [`padporter_core::SourceProvider`] capability trait. The orchestrator
//! is transport-blind; these two adapters are the only place a concrete
//! transport appears.

mod local;
mod remote;

pub use local::LocalProvider;
pub use remote::{RemoteProvider, ShareSession};

/// Join a provider-relative parent path and an entry name
pub(crate) fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
