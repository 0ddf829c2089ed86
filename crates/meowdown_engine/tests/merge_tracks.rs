use std::fs;
use std::path::{Path, PathBuf};

use meowdown_engine::{merge_tracks, MergeError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"audio").unwrap();
    path
}

fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

/// Stub transcoder: copies the concat list next to itself so tests can
/// inspect what would have been merged, then exits with the given code.
#[cfg(unix)]
fn stub_ffmpeg(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("ffmpeg-stub");
    let script = format!(
        "#!/bin/sh\ncp \"$7\" \"$(dirname \"$0\")/captured-list.txt\"\nexit {exit_code}\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn empty_directory_is_a_successful_noop() {
    let temp = TempDir::new().unwrap();
    let result = merge_tracks(temp.path(), "mp3", Path::new("ffmpeg-that-does-not-exist"));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn single_track_is_a_successful_noop() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001 - 🎵Only Song.mp3");

    let result = merge_tracks(temp.path(), "mp3", Path::new("ffmpeg-that-does-not-exist"));
    assert!(matches!(result, Ok(None)));
    // The lone track is untouched and no list file leaks.
    assert_eq!(entry_count(temp.path()), 1);
}

#[test]
fn non_audio_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "🎵Song.mp3");
    touch(temp.path(), "🎵Song.info.json");
    touch(temp.path(), "cover.webp");

    let result = merge_tracks(temp.path(), "mp3", Path::new("ffmpeg-that-does-not-exist"));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn a_previous_mix_is_not_merged_again() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "🎵 playlist mix.mp3");
    touch(temp.path(), "🎵Song.mp3");

    let result = merge_tracks(temp.path(), "mp3", Path::new("ffmpeg-that-does-not-exist"));
    assert!(matches!(result, Ok(None)));
}

#[cfg(unix)]
#[test]
fn tracks_are_listed_in_ordinal_order() {
    let stub_dir = TempDir::new().unwrap();
    let ffmpeg = stub_ffmpeg(stub_dir.path(), 0);

    let temp = TempDir::new().unwrap();
    // Created out of order on purpose; zero-padded ordinals sort them.
    touch(temp.path(), "003 - 🎵Third.mp3");
    touch(temp.path(), "001 - 🎵First.mp3");
    touch(temp.path(), "002 - 🎵Second.mp3");

    let result = merge_tracks(temp.path(), "mp3", &ffmpeg).unwrap();
    assert_eq!(
        result,
        Some(temp.path().join("🎵 playlist mix.mp3"))
    );

    let captured = fs::read_to_string(stub_dir.path().join("captured-list.txt")).unwrap();
    let names: Vec<&str> = captured.lines().collect();
    assert_eq!(names.len(), 3);
    assert!(names[0].contains("001 - 🎵First.mp3"));
    assert!(names[1].contains("002 - 🎵Second.mp3"));
    assert!(names[2].contains("003 - 🎵Third.mp3"));

    // The concat list itself was cleaned up.
    assert_eq!(entry_count(temp.path()), 3);
}

#[cfg(unix)]
#[test]
fn transcoder_failure_surfaces_and_keeps_tracks() {
    let stub_dir = TempDir::new().unwrap();
    let ffmpeg = stub_ffmpeg(stub_dir.path(), 1);

    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001 - 🎵First.mp3");
    touch(temp.path(), "002 - 🎵Second.mp3");

    let err = merge_tracks(temp.path(), "mp3", &ffmpeg).unwrap_err();
    assert!(matches!(err, MergeError::TranscoderFailed(_)));

    // Tracks stay in place and the list file is gone on the failure path too.
    assert_eq!(entry_count(temp.path()), 2);
}

#[test]
fn missing_transcoder_binary_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "001 - 🎵First.mp3");
    touch(temp.path(), "002 - 🎵Second.mp3");

    let err = merge_tracks(temp.path(), "mp3", Path::new("ffmpeg-that-does-not-exist"))
        .unwrap_err();
    assert!(matches!(err, MergeError::Io(_)));
    assert_eq!(entry_count(temp.path()), 2);
}
