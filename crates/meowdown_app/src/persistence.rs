//! RON persistence of the user's form settings between runs.
//!
//! Stored as `.meowdown_settings.ron` in the current working directory,
//! next to the log file. Missing or corrupt settings fall back to defaults.

use std::fs;
use std::path::PathBuf;

use meow_logging::{meow_error, meow_info, meow_warn};
use meowdown_core::{
    AudioQuality, DownloadOptions, MediaFormat, Organization, QualityTier, SizeLimit,
};
use meowdown_engine::AtomicFileWriter;
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = ".meowdown_settings.ron";

/// Serialized mirror of the form; enum choices are stored as short tags so
/// the file stays readable and forward-compatible.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSettings {
    destination: String,
    format: String,
    quality: Option<String>,
    audio_quality: String,
    is_playlist: bool,
    channel_mode: bool,
    playlist_limit: Option<u32>,
    playlist_numbering: bool,
    duration_filter: bool,
    duration_min: Option<u32>,
    duration_max: Option<u32>,
    max_filesize: Option<String>,
    skip_shorts: bool,
    organization: String,
    write_metadata: bool,
    write_thumbnail: bool,
    embed_metadata: bool,
    subtitle_langs: Vec<String>,
    retries: Option<u32>,
    use_archive: bool,
    merge_playlist: bool,
}

pub(crate) fn load_settings() -> Option<(String, DownloadOptions)> {
    let path = settings_path();
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            meow_warn!("Failed to read settings from {:?}: {}", path, err);
            return None;
        }
    };

    let persisted: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            meow_warn!("Failed to parse settings from {:?}: {}", path, err);
            return None;
        }
    };

    meow_info!("Loaded settings from {:?}", path);
    Some((persisted.destination.clone(), to_options(&persisted)))
}

pub(crate) fn save_settings(destination: &str, options: &DownloadOptions) {
    let persisted = from_options(destination, options);

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            meow_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    let dir = settings_path()
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let writer = AtomicFileWriter::new(dir);
    if let Err(err) = writer.write(SETTINGS_FILENAME, &content) {
        meow_error!("Failed to write settings: {}", err);
    }
}

fn settings_path() -> PathBuf {
    PathBuf::from(".").join(SETTINGS_FILENAME)
}

fn to_options(persisted: &PersistedSettings) -> DownloadOptions {
    DownloadOptions {
        format: match persisted.format.as_str() {
            "best" => MediaFormat::BestAvailable,
            "mp3" => MediaFormat::Mp3,
            "mp3_complete" => MediaFormat::Mp3Complete,
            _ => MediaFormat::Mp4,
        },
        quality: persisted
            .quality
            .as_deref()
            .and_then(|tag| match tag {
                "720p" => Some(QualityTier::P720),
                "1080p" => Some(QualityTier::P1080),
                "1440p" => Some(QualityTier::P1440),
                "2160p" => Some(QualityTier::P2160),
                "best" => Some(QualityTier::Best),
                "worst" => Some(QualityTier::Worst),
                _ => None,
            }),
        audio_quality: match persisted.audio_quality.as_str() {
            "320" => AudioQuality::Kbps320,
            "256" => AudioQuality::Kbps256,
            "192" => AudioQuality::Kbps192,
            "128" => AudioQuality::Kbps128,
            _ => AudioQuality::Best,
        },
        is_playlist: persisted.is_playlist,
        channel_mode: persisted.channel_mode,
        playlist_limit: persisted.playlist_limit,
        playlist_numbering: persisted.playlist_numbering,
        duration_filter: persisted.duration_filter,
        duration_min: persisted.duration_min,
        duration_max: persisted.duration_max,
        max_filesize: persisted
            .max_filesize
            .as_deref()
            .and_then(|tag| match tag {
                "50M" => Some(SizeLimit::M50),
                "100M" => Some(SizeLimit::M100),
                "250M" => Some(SizeLimit::M250),
                "500M" => Some(SizeLimit::M500),
                "1G" => Some(SizeLimit::G1),
                "2G" => Some(SizeLimit::G2),
                _ => None,
            }),
        skip_shorts: persisted.skip_shorts,
        organization: match persisted.organization.as_str() {
            "date" => Organization::ByDate,
            "channel" => Organization::ByChannel,
            "type" => Organization::ByType,
            "playlist" => Organization::ByPlaylist,
            _ => Organization::None,
        },
        write_metadata: persisted.write_metadata,
        write_thumbnail: persisted.write_thumbnail,
        embed_metadata: persisted.embed_metadata,
        subtitle_langs: persisted.subtitle_langs.clone(),
        retries: persisted.retries,
        use_archive: persisted.use_archive,
        merge_playlist: persisted.merge_playlist,
    }
}

fn from_options(destination: &str, options: &DownloadOptions) -> PersistedSettings {
    PersistedSettings {
        destination: destination.to_string(),
        format: match options.format {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::BestAvailable => "best",
            MediaFormat::Mp3 => "mp3",
            MediaFormat::Mp3Complete => "mp3_complete",
        }
        .to_string(),
        quality: options.quality.map(|tier| {
            match tier {
                QualityTier::P720 => "720p",
                QualityTier::P1080 => "1080p",
                QualityTier::P1440 => "1440p",
                QualityTier::P2160 => "2160p",
                QualityTier::Best => "best",
                QualityTier::Worst => "worst",
            }
            .to_string()
        }),
        audio_quality: match options.audio_quality {
            AudioQuality::Best => "best",
            AudioQuality::Kbps320 => "320",
            AudioQuality::Kbps256 => "256",
            AudioQuality::Kbps192 => "192",
            AudioQuality::Kbps128 => "128",
        }
        .to_string(),
        is_playlist: options.is_playlist,
        channel_mode: options.channel_mode,
        playlist_limit: options.playlist_limit,
        playlist_numbering: options.playlist_numbering,
        duration_filter: options.duration_filter,
        duration_min: options.duration_min,
        duration_max: options.duration_max,
        max_filesize: options.max_filesize.map(|limit| {
            match limit {
                SizeLimit::M50 => "50M",
                SizeLimit::M100 => "100M",
                SizeLimit::M250 => "250M",
                SizeLimit::M500 => "500M",
                SizeLimit::G1 => "1G",
                SizeLimit::G2 => "2G",
            }
            .to_string()
        }),
        skip_shorts: options.skip_shorts,
        organization: match options.organization {
            Organization::None => "none",
            Organization::ByDate => "date",
            Organization::ByChannel => "channel",
            Organization::ByType => "type",
            Organization::ByPlaylist => "playlist",
        }
        .to_string(),
        write_metadata: options.write_metadata,
        write_thumbnail: options.write_thumbnail,
        embed_metadata: options.embed_metadata,
        subtitle_langs: options.subtitle_langs.clone(),
        retries: options.retries,
        use_archive: options.use_archive,
        merge_playlist: options.merge_playlist,
    }
}
