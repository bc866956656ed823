//! PadPorter Core
//!
//! Shared types, traits, and error handling for PadPorter.
//!
//! This crate defines the building blocks the conversion and mirroring
//! layers agree on:
//! - **Audio Types**: `AudioBuffer`, `AudioFormat`, `SampleRate`
//! - **Source Model**: `SourceEntry`, `EntryKind`
//! - **Capability Traits**: `SourceProvider`, `Reporter`
//! - **Cancellation**: `CancelToken`
//!
//! It performs no I/O of its own; providers and sinks are implemented by
//! the crates that own the corresponding resources.

pub mod cancel;
pub mod error;
pub mod report;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use error::ProviderError;
pub use report::{NullReporter, ReportEvent, Reporter, Severity, TracingReporter};
pub use traits::SourceProvider;
pub use types::{AudioBuffer, AudioFormat, EntryKind, SampleRate, SourceEntry};
