//! Pure construction of extraction-tool argument lists.
//!
//! `build_command` reads option values only; it never touches the
//! filesystem. The engine appends `--ffmpeg-location` before spawning,
//! since that depends on a filesystem probe.

use std::path::{Path, PathBuf};

use crate::options::{DownloadOptions, MediaFormat};

/// Item cap when expanding a playlist without an explicit limit.
const DEFAULT_PLAYLIST_CAP: u32 = 25;
/// Channels are effectively unbounded playlists; cap them harder.
const DEFAULT_CHANNEL_CAP: u32 = 50;

const AUDIO_TEMPLATE: &str = "🎵%(title)s.%(ext)s";
const VIDEO_TEMPLATE: &str = "🎬%(title)s.%(ext)s";
const ORDINAL_PREFIX: &str = "%(playlist_index)03d - ";

/// Download-history file kept at the destination root for idempotent re-runs.
pub const ARCHIVE_FILENAME: &str = ".meowdown_history.txt";

/// Builds the full argument list for one URL. In batch mode this is called
/// once per URL; every list shares the same trailing flags.
pub fn build_command(url: &str, destination: &Path, options: &DownloadOptions) -> Vec<String> {
    let mut args = vec!["--newline".to_string()];

    if options.channel_mode || options.is_playlist {
        let default_cap = if options.channel_mode {
            DEFAULT_CHANNEL_CAP
        } else {
            DEFAULT_PLAYLIST_CAP
        };
        let cap = options.playlist_limit.unwrap_or(default_cap);
        args.push("--yes-playlist".into());
        args.push("--playlist-items".into());
        args.push(format!("1:{cap}"));
    } else {
        args.push("--no-playlist".into());
    }

    let filters = filter_clause(options);
    push_format_selection(&mut args, options, filters.as_deref());

    args.push("-o".into());
    args.push(output_template(destination, options));

    if let Some(retries) = options.retries {
        args.push("--retries".into());
        args.push(retries.to_string());
    }
    if options.use_archive {
        args.push("--download-archive".into());
        args.push(
            destination
                .join(ARCHIVE_FILENAME)
                .to_string_lossy()
                .into_owned(),
        );
    }
    if options.write_metadata {
        args.push("--write-info-json".into());
    }
    if options.write_thumbnail {
        args.push("--write-thumbnail".into());
    }
    if !options.subtitle_langs.is_empty() {
        args.push("--write-subs".into());
        args.push("--sub-langs".into());
        args.push(options.subtitle_langs.join(","));
    }
    if options.embed_metadata {
        args.push("--embed-metadata".into());
        if options.format.is_audio() {
            args.push("--embed-thumbnail".into());
        }
    }

    args.push(url.to_string());
    args
}

/// The directory scanned by the playlist-mix step. Only statically known
/// organization segments can be resolved here; template-expanded segments
/// fall back to the destination root.
pub fn merge_directory(destination: &Path, options: &DownloadOptions) -> PathBuf {
    match options.organization.dir_template(options.format) {
        Some(dir) if !dir.contains("%(") => destination.join(dir),
        _ => destination.to_path_buf(),
    }
}

/// Format selection is a priority chain; exactly one selector decision is
/// made, so duplicate or conflicting `-f` flags cannot occur.
fn push_format_selection(args: &mut Vec<String>, options: &DownloadOptions, filters: Option<&str>) {
    if let Some(tier) = options.quality {
        args.push("-f".into());
        args.push(video_selector(tier.base_selector(), filters));
        return;
    }
    match options.format {
        MediaFormat::BestAvailable => {
            args.push("-f".into());
            args.push(video_selector("bestvideo+bestaudio/best", filters));
        }
        MediaFormat::Mp3 | MediaFormat::Mp3Complete => {
            args.push("-x".into());
            args.push("--audio-format".into());
            args.push("mp3".into());
            args.push("--audio-quality".into());
            args.push(options.audio_quality.encoder_param().into());
            if let Some(clause) = filters {
                args.push("-f".into());
                args.push(format!("bestaudio[{clause}]/bestaudio"));
            }
        }
        MediaFormat::Mp4 => {
            args.push("-f".into());
            args.push(video_selector("best[ext=mp4]/best", filters));
        }
    }
}

/// Composes the filter clause into the selector at construction time: the
/// primary alternative gains a bracketed clause, with the unfiltered chain
/// kept as fallback.
fn video_selector(base: &str, filters: Option<&str>) -> String {
    match filters {
        None => base.to_string(),
        Some(clause) => {
            let primary = base.split('/').next().unwrap_or(base);
            format!("{primary}[{clause}]/{base}")
        }
    }
}

fn filter_clause(options: &DownloadOptions) -> Option<String> {
    let mut parts = Vec::new();
    if options.duration_filter {
        if let Some(min) = options.duration_min {
            parts.push(format!("duration>={min}"));
        }
        if let Some(max) = options.duration_max {
            parts.push(format!("duration<={max}"));
        }
    }
    if let Some(limit) = options.max_filesize {
        parts.push(format!("filesize<{}", limit.filter_value()));
    }
    if options.skip_shorts {
        parts.push("duration>=60".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" & "))
    }
}

/// Output path template: organization directory segment, then an optional
/// zero-padded ordinal, then the emoji-prefixed base pattern for the format.
fn output_template(destination: &Path, options: &DownloadOptions) -> String {
    let base = if options.format.is_audio() {
        AUDIO_TEMPLATE
    } else {
        VIDEO_TEMPLATE
    };
    let numbered = options.playlist_numbering && (options.is_playlist || options.channel_mode);
    let mut name = String::new();
    if numbered {
        name.push_str(ORDINAL_PREFIX);
    }
    name.push_str(base);

    let mut path = destination.to_path_buf();
    if let Some(dir) = options.organization.dir_template(options.format) {
        path = path.join(dir);
    }
    path.join(name).to_string_lossy().into_owned()
}
