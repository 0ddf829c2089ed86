//! Playlist-mix post-processor: stitches downloaded audio tracks into a
//! single file with the transcoder's concat demuxer.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use meow_logging::{meow_info, meow_warn};
use tempfile::NamedTempFile;

use crate::MergeError;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "opus", "ogg", "flac", "wav"];
const MIX_BASENAME: &str = "🎵 playlist mix";

/// Concatenates the audio tracks found in `directory` into
/// `🎵 playlist mix.<extension>`.
///
/// Tracks are sorted by filename; the command builder's zero-padded
/// ordinals give playlist order when numbering was requested, otherwise the
/// order is plain lexicographic. Fewer than two tracks is a successful
/// no-op. A partial output file is left in place when the transcoder fails.
pub fn merge_tracks(
    directory: &Path,
    extension: &str,
    ffmpeg: &Path,
) -> Result<Option<PathBuf>, MergeError> {
    let mut tracks = collect_tracks(directory)?;
    if tracks.len() < 2 {
        meow_info!(
            "merge skipped: {} track(s) in {:?}",
            tracks.len(),
            directory
        );
        return Ok(None);
    }
    tracks.sort();

    let output = directory.join(format!("{MIX_BASENAME}.{extension}"));

    // The concat list lives next to the tracks and is deleted when this
    // scope ends, on success and failure alike.
    let mut list = NamedTempFile::new_in(directory)?;
    for track in &tracks {
        writeln!(list, "file '{}'", escape_concat_path(track))?;
    }
    list.flush()?;

    let stream_copy = tracks.iter().all(|track| {
        track
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    });

    let mut command = Command::new(ffmpeg);
    command
        .arg("-y")
        .args(["-f", "concat", "-safe", "0", "-i"])
        .arg(list.path())
        // Metadata of the first input carries over to the mix.
        .args(["-map_metadata", "0"]);
    if stream_copy {
        command.args(["-c", "copy"]);
    } else {
        command.args(["-c:a", "libmp3lame", "-b:a", "320k"]);
    }
    command
        .arg(&output)
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    meow_info!(
        "merging {} tracks into {:?} (stream_copy={})",
        tracks.len(),
        output,
        stream_copy
    );
    let status = command.status()?;
    if !status.success() {
        meow_warn!("transcoder failed with {}", status);
        return Err(MergeError::TranscoderFailed(status));
    }
    Ok(Some(output))
}

/// Audio files eligible for merging, excluding any previous mix output.
fn collect_tracks(directory: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let mut tracks = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_audio = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                AUDIO_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        if !is_audio {
            continue;
        }
        let is_previous_mix = path
            .file_stem()
            .and_then(OsStr::to_str)
            .is_some_and(|stem| stem == MIX_BASENAME);
        if is_previous_mix {
            continue;
        }
        tracks.push(path);
    }
    Ok(tracks)
}

/// Single quotes inside concat list entries need the `'\''` dance.
fn escape_concat_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}
