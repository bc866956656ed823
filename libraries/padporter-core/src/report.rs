/// Injected progress/error reporting
///
/// The mirroring core never writes to a fixed log destination. It emits
/// structured events through a `Reporter` handed in by the caller; what
/// happens to them (terminal, GUI status line, test collection) is the
/// caller's business.
use serde::{Deserialize, Serialize};

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Progress information
    Info,
    /// Recoverable problem; the run continues
    Warning,
    /// Item-level failure; the item was skipped
    Error,
}

/// One structured progress or error event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEvent {
    /// Event severity
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Source path or other locus the event refers to, when there is one
    pub context: Option<String>,
}

impl ReportEvent {
    /// Build an info event
    pub fn info(message: impl Into<String>, context: impl Into<Option<String>>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            context: context.into(),
        }
    }

    /// Build a warning event
    pub fn warning(message: impl Into<String>, context: impl Into<Option<String>>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            context: context.into(),
        }
    }

    /// Build an error event
    pub fn error(message: impl Into<String>, context: impl Into<Option<String>>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Sink for structured progress/error events
pub trait Reporter {
    /// Deliver one event
    fn report(&self, event: ReportEvent);
}

/// Reporter that forwards events to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: ReportEvent) {
        let context = event.context.as_deref().unwrap_or("");
        match event.severity {
            Severity::Info => tracing::info!(context, "{}", event.message),
            Severity::Warning => tracing::warn!(context, "{}", event.message),
            Severity::Error => tracing::error!(context, "{}", event.message),
        }
    }
}

/// Reporter that discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: ReportEvent) {}
}
