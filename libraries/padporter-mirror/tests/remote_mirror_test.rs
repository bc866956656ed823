//! Mirror runs over a fake remote share
//!
//! The session is an in-memory tree, so these tests exercise the
//! staging path (fetch bytes, stage, decode, clean up) and the
//! exactly-once session release.

use hound::{SampleFormat, WavSpec, WavWriter};
use padporter_core::{CancelToken, NullReporter, ProviderError, SourceEntry};
use padporter_mirror::{MirrorConfig, RemoteProvider, ShareSession, TreeMirror};
use std::collections::BTreeMap;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Render a small 16-bit PCM WAV into memory
fn sine_wav_bytes(sample_rate: u32, frames: usize) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        writer
            .write_sample(((2.0 * PI * 440.0 * t).sin() * 0.5 * 32_767.0).round() as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
    std::fs::read(&path).unwrap()
}

/// In-memory share: directory path -> entries, file path -> bytes
struct FakeSession {
    dirs: BTreeMap<String, Vec<SourceEntry>>,
    files: BTreeMap<String, Vec<u8>>,
    disconnects: Arc<AtomicUsize>,
}

impl FakeSession {
    fn new(disconnects: Arc<AtomicUsize>) -> Self {
        Self {
            dirs: BTreeMap::new(),
            files: BTreeMap::new(),
            disconnects,
        }
    }

    fn add_dir(&mut self, parent: &str, name: &str) {
        let path = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}/{name}")
        };
        self.dirs.entry(parent.to_string()).or_default().push(
            SourceEntry::directory(name, path.clone()),
        );
        self.dirs.entry(path).or_default();
    }

    fn add_file(&mut self, parent: &str, name: &str, bytes: Vec<u8>) {
        let path = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}/{name}")
        };
        self.dirs
            .entry(parent.to_string())
            .or_default()
            .push(SourceEntry::file(name, path.clone()));
        self.files.insert(path, bytes);
    }
}

impl ShareSession for FakeSession {
    fn list_dir(&mut self, path: &str) -> Result<Vec<SourceEntry>, ProviderError> {
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }

    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, ProviderError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }

    fn disconnect(&mut self) -> Result<(), ProviderError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn mirrors_remote_tree_through_staging() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("dest");

    let disconnects = Arc::new(AtomicUsize::new(0));
    let mut session = FakeSession::new(Arc::clone(&disconnects));
    session.add_dir("", "Loops & Breaks");
    session.add_file(
        "Loops & Breaks",
        "Groove #1.wav",
        sine_wav_bytes(44_100, 441),
    );
    session.add_file("", "note.txt", b"not audio".to_vec());

    {
        let mut provider = RemoteProvider::new(session);
        let mut mirror = TreeMirror::new(
            &mut provider,
            &NullReporter,
            CancelToken::new(),
            MirrorConfig::default(),
        );
        let summary = mirror.run("", &dest).unwrap();

        assert!(summary.success());
        assert_eq!(summary.files_converted, 1);
        assert_eq!(summary.files_skipped, 1);
        assert!(dest.join("Loops_Breaks/Groove_1.wav").is_file());
    }

    // The session is released exactly once when the provider goes away
    assert_eq!(disconnects.load(Ordering::SeqCst), 1);
}

#[test]
fn pseudo_entries_from_the_share_are_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("dest");

    let disconnects = Arc::new(AtomicUsize::new(0));
    let mut session = FakeSession::new(Arc::clone(&disconnects));
    session.add_file("", "kick.wav", sine_wav_bytes(44_100, 441));
    // Shares commonly surface these
    session
        .dirs
        .get_mut("")
        .unwrap()
        .push(SourceEntry::directory(".", "."));
    session
        .dirs
        .get_mut("")
        .unwrap()
        .push(SourceEntry::directory("..", ".."));

    let mut provider = RemoteProvider::new(session);
    let mut mirror = TreeMirror::new(
        &mut provider,
        &NullReporter,
        CancelToken::new(),
        MirrorConfig::default(),
    );
    let summary = mirror.run("", &dest).unwrap();

    assert!(summary.success());
    assert_eq!(summary.files_converted, 1);
    // No recursion into the pseudo-entries happened
    assert_eq!(summary.directories_created, 1);
}

#[test]
fn remote_fetch_failure_is_a_file_fault() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("dest");

    let disconnects = Arc::new(AtomicUsize::new(0));
    let mut session = FakeSession::new(Arc::clone(&disconnects));
    session.add_file("", "bbb_good.wav", sine_wav_bytes(44_100, 441));
    // Listed but unreadable: fetch will fail
    session
        .dirs
        .get_mut("")
        .unwrap()
        .push(SourceEntry::file("aaa_ghost.wav", "aaa_ghost.wav"));

    let mut provider = RemoteProvider::new(session);
    let mut mirror = TreeMirror::new(
        &mut provider,
        &NullReporter,
        CancelToken::new(),
        MirrorConfig::default(),
    );
    let summary = mirror.run("", &dest).unwrap();

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_converted, 1);
    // The failed fetch did not consume the counter slot
    assert!(dest.join("bbb_good.wav").is_file());
}

#[test]
fn unreachable_remote_root_is_a_run_fault_and_still_disconnects() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("dest");

    let disconnects = Arc::new(AtomicUsize::new(0));
    let session = FakeSession::new(Arc::clone(&disconnects));

    {
        let mut provider = RemoteProvider::new(session);
        let mut mirror = TreeMirror::new(
            &mut provider,
            &NullReporter,
            CancelToken::new(),
            MirrorConfig::default(),
        );
        let result = mirror.run("no/such/path", &dest);
        assert!(result.is_err());
    }

    assert_eq!(disconnects.load(Ordering::SeqCst), 1);
}
