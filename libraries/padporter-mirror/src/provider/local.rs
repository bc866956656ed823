//! Direct local filesystem source access

use padporter_core::{ProviderError, SourceEntry, SourceProvider};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::child_path;

/// Source provider backed by the local filesystem
///
/// Paths handed to the trait methods are relative to `root`; the empty
/// path denotes the root itself.
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    /// Create a provider rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

fn map_io(err: std::io::Error, path: &Path) -> ProviderError {
    match err.kind() {
        ErrorKind::NotFound => ProviderError::NotFound(path.display().to_string()),
        ErrorKind::PermissionDenied => {
            ProviderError::PermissionDenied(path.display().to_string())
        }
        _ => ProviderError::Io(err),
    }
}

impl SourceProvider for LocalProvider {
    fn list(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError> {
        let full = self.resolve(path);
        if full.exists() && !full.is_dir() {
            return Err(ProviderError::NotADirectory(full.display().to_string()));
        }

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&full).map_err(|e| map_io(e, &full))? {
            let dir_entry = dir_entry.map_err(|e| map_io(e, &full))?;
            let file_type = dir_entry.file_type().map_err(|e| map_io(e, &full))?;
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let entry_path = child_path(path, &name);

            let entry = if file_type.is_dir() {
                SourceEntry::directory(name, entry_path)
            } else if file_type.is_file() {
                SourceEntry::file(name, entry_path)
            } else {
                // Sockets, fifos, dangling symlinks: nothing to mirror
                continue;
            };
            entries.push(entry);
        }
        Ok(entries)
    }

    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ProviderError> {
        let full = self.resolve(path);
        fs::read(&full).map_err(|e| map_io(e, &full))
    }

    fn local_path(&self, path: &str) -> Option<PathBuf> {
        Some(self.resolve(path))
    }
}
