//! The recursive tree-mirroring orchestrator
//!
//! Walks the source through a `SourceProvider`, normalizes every entry
//! name, converts every qualifying file, and isolates failures: a bad
//! file costs that file, a bad directory costs that subtree, and only
//! run-level preconditions abort the run.

use crate::error::MirrorError;
use crate::normalize::normalize;
use crate::provider::child_path;
use crate::types::{MirrorConfig, RunState, RunSummary};
use padporter_audio::{convert, decoder, writer, AudioError};
use padporter_core::{
    CancelToken, EntryKind, ProviderError, ReportEvent, Reporter, SourceEntry, SourceProvider,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file-scoped failure; consumed by the directory loop, never
/// propagated
#[derive(Debug, Error)]
enum FileFault {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    #[error("staging failed: {0}")]
    Staging(#[from] std::io::Error),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Recursive mirror driver
///
/// One instance drives one run; provider, reporter, and cancellation
/// token are injected and the orchestrator owns nothing global.
pub struct TreeMirror<'a, P: SourceProvider> {
    provider: &'a mut P,
    reporter: &'a dyn Reporter,
    cancel: CancelToken,
    config: MirrorConfig,
    staged_seq: u64,
}

impl<'a, P: SourceProvider> TreeMirror<'a, P> {
    /// Create a mirror driver
    pub fn new(
        provider: &'a mut P,
        reporter: &'a dyn Reporter,
        cancel: CancelToken,
        config: MirrorConfig,
    ) -> Self {
        Self {
            provider,
            reporter,
            cancel,
            config,
            staged_seq: 0,
        }
    }

    /// Mirror `source_root` (provider-relative, empty for the provider's
    /// own root) into `dest_root`
    ///
    /// Returns a summary unless a run-level precondition fails: the
    /// source root must list, the destination root must be creatable,
    /// and the staging directory must be creatable. Already-written
    /// output is never rolled back, neither on cancellation nor on
    /// item-level failures.
    pub fn run(&mut self, source_root: &str, dest_root: &Path) -> Result<RunSummary, MirrorError> {
        let root_entries =
            self.provider
                .list(source_root)
                .map_err(|source| MirrorError::SourceRoot {
                    path: source_root.to_string(),
                    source,
                })?;

        fs::create_dir_all(dest_root).map_err(|source| MirrorError::DestinationRoot {
            path: dest_root.display().to_string(),
            source,
        })?;

        // The staging directory lives for the whole run and is removed
        // on drop, cancellation and panics included.
        let staging = tempfile::tempdir().map_err(MirrorError::Staging)?;

        let mut summary = RunSummary::new();
        self.visit_directory(
            source_root,
            dest_root,
            Some(root_entries),
            staging.path(),
            &mut summary,
        );

        summary.state = if self.cancel.is_cancelled() {
            RunState::Cancelled
        } else {
            RunState::Completed
        };
        self.reporter
            .report(ReportEvent::info(summary.summary_text(), None));
        Ok(summary)
    }

    /// Process one directory level; all faults are consumed here
    fn visit_directory(
        &mut self,
        source_path: &str,
        dest_path: &Path,
        prefetched: Option<Vec<SourceEntry>>,
        staging: &Path,
        summary: &mut RunSummary,
    ) {
        if let Err(e) = fs::create_dir_all(dest_path) {
            tracing::warn!("Skipping subtree {}: {}", source_path, e);
            self.reporter.report(ReportEvent::warning(
                format!("Cannot create destination directory: {}", e),
                Some(source_path.to_string()),
            ));
            summary.subtrees_skipped += 1;
            return;
        }
        summary.directories_created += 1;

        if self.cancel.is_cancelled() {
            return;
        }

        let entries = match prefetched {
            Some(entries) => entries,
            None => match self.provider.list(source_path) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Skipping subtree {}: {}", source_path, e);
                    self.reporter.report(ReportEvent::warning(
                        format!("Cannot list directory: {}", e),
                        Some(source_path.to_string()),
                    ));
                    summary.subtrees_skipped += 1;
                    return;
                }
            },
        };

        let mut entries: Vec<SourceEntry> =
            entries.into_iter().filter(|e| !e.is_pseudo()).collect();
        if self.config.sort_listing {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }

        self.reporter.report(ReportEvent::info(
            format!("Processing directory ({} entries)", entries.len()),
            Some(source_path.to_string()),
        ));

        // Uniqueness counter, scoped to this directory level only
        let mut file_counter: u32 = 0;

        for entry in entries {
            match entry.kind {
                EntryKind::Directory => {
                    let child_source = child_path(source_path, &entry.name);
                    let child_dest = dest_path.join(normalize(&entry.name, 0));
                    self.visit_directory(&child_source, &child_dest, None, staging, summary);
                }
                EntryKind::File => {
                    if !decoder::is_wav_file(&entry.name) {
                        self.reporter.report(ReportEvent::info(
                            "Skipping non-WAV file".to_string(),
                            Some(entry.path.clone()),
                        ));
                        summary.files_skipped += 1;
                        continue;
                    }

                    let dest_name = normalize(&entry.name, file_counter);
                    let dest_file = dest_path.join(&dest_name);
                    match self.process_file(&entry, &dest_file, staging) {
                        Ok(()) => {
                            self.reporter.report(ReportEvent::info(
                                format!("Converted to {}", dest_name),
                                Some(entry.path.clone()),
                            ));
                            summary.files_converted += 1;
                            // A failed file does not consume a
                            // uniqueness slot.
                            file_counter += 1;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to convert {}: {}", entry.path, e);
                            self.reporter.report(ReportEvent::error(
                                format!("Conversion failed: {}", e),
                                Some(entry.path.clone()),
                            ));
                            summary.files_failed += 1;
                        }
                    }
                }
            }
        }
    }

    /// Fetch, decode, convert, and write one qualifying file
    fn process_file(
        &mut self,
        entry: &SourceEntry,
        dest_file: &Path,
        staging: &Path,
    ) -> Result<(), FileFault> {
        match self.provider.local_path(&entry.path) {
            Some(local) => self.convert_and_write(&local, dest_file),
            None => {
                let bytes = self.provider.fetch(&entry.path)?;
                let staged = self.stage_bytes(&bytes, staging)?;
                let result = self.convert_and_write(&staged, dest_file);
                // The transient copy goes away regardless of outcome.
                if let Err(e) = fs::remove_file(&staged) {
                    tracing::warn!("Failed to remove staging file {}: {}", staged.display(), e);
                }
                result
            }
        }
    }

    fn stage_bytes(&mut self, bytes: &[u8], staging: &Path) -> Result<PathBuf, std::io::Error> {
        self.staged_seq += 1;
        let staged = staging.join(format!("stage_{:06}.wav", self.staged_seq));
        fs::write(&staged, bytes)?;
        Ok(staged)
    }

    fn convert_and_write(&self, source: &Path, dest_file: &Path) -> Result<(), FileFault> {
        let buffer = decoder::decode_file(source)?;
        let converted = convert::convert(&buffer, &self.config.convert)?;
        writer::write_wav(dest_file, &converted)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padporter_core::NullReporter;

    struct EmptyProvider;

    impl SourceProvider for EmptyProvider {
        fn list(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError> {
            if path.is_empty() {
                Ok(Vec::new())
            } else {
                Err(ProviderError::NotFound(path.to_string()))
            }
        }

        fn fetch(&mut self, path: &str) -> Result<Vec<u8>, ProviderError> {
            Err(ProviderError::NotFound(path.to_string()))
        }
    }

    #[test]
    fn empty_source_completes_with_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let mut provider = EmptyProvider;
        let mut mirror = TreeMirror::new(
            &mut provider,
            &NullReporter,
            CancelToken::new(),
            MirrorConfig::default(),
        );

        let summary = mirror.run("", &dest).unwrap();
        assert!(summary.success());
        assert_eq!(summary.files_converted, 0);
        assert_eq!(summary.directories_created, 1);
        assert!(dest.is_dir());
    }

    #[test]
    fn unreachable_source_root_is_a_run_fault() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = EmptyProvider;
        let mut mirror = TreeMirror::new(
            &mut provider,
            &NullReporter,
            CancelToken::new(),
            MirrorConfig::default(),
        );

        let result = mirror.run("missing", &dir.path().join("out"));
        assert!(matches!(result, Err(MirrorError::SourceRoot { .. })));
    }

    #[test]
    fn pre_cancelled_run_reports_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = EmptyProvider;
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut mirror = TreeMirror::new(
            &mut provider,
            &NullReporter,
            cancel,
            MirrorConfig::default(),
        );

        let summary = mirror.run("", &dir.path().join("out")).unwrap();
        assert_eq!(summary.state, RunState::Cancelled);
        assert!(!summary.success());
    }
}
