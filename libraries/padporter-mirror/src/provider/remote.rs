//! Remote-share source access
//!
//! The wire protocol is an external collaborator. It hands us an
//! established [`ShareSession`]; this adapter exposes it as a
//! [`SourceProvider`] and guarantees the session is released exactly
//! once per run, on every exit path.

use padporter_core::{ProviderError, SourceEntry, SourceProvider};

/// An established session on a remote share
///
/// Implementations own the protocol I/O (connection, authentication,
/// wire format). `disconnect` is called exactly once by the owning
/// [`RemoteProvider`]; implementations need not guard against repeats.
pub trait ShareSession {
    /// List the entries directly under `path`
    ///
    /// May include the `.`/`..` pseudo-entries; callers filter them.
    fn list_dir(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError>;

    /// Read the full contents of the file at `path`
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, ProviderError>;

    /// Release the session
    fn disconnect(&mut self) -> Result<(), ProviderError>;
}

/// Source provider over a remote-share session
///
/// Owns the session for the duration of a run. Dropping the provider
/// disconnects; an explicit [`RemoteProvider::disconnect`] does the
/// same but surfaces the protocol error instead of logging it.
pub struct RemoteProvider<S: ShareSession> {
    session: S,
    released: bool,
}

impl<S: ShareSession> RemoteProvider<S> {
    /// Wrap an established session
    pub fn new(session: S) -> Self {
        Self {
            session,
            released: false,
        }
    }

    /// Release the session, surfacing any protocol error
    pub fn disconnect(mut self) -> Result<(), ProviderError> {
        self.released = true;
        self.session.disconnect()
    }
}

impl<S: ShareSession> SourceProvider for RemoteProvider<S> {
    fn list(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError> {
        self.session.list_dir(path)
    }

    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ProviderError> {
        self.session.read_file(path)
    }
}

impl<S: ShareSession> Drop for RemoteProvider<S> {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(e) = self.session.disconnect() {
                tracing::warn!("Failed to release remote session: {}", e);
            }
        }
    }
}
