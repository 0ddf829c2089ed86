//! User-selected download options: closed enumerations plus the lookup
//! tables that map each choice to extraction-tool behaviour. Display labels
//! live next to the behaviour tables but are never matched on.

/// Output format choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    /// Prefer an mp4 container, falling back to the best single stream.
    #[default]
    Mp4,
    /// Best available video+audio streams, merged by the extraction tool.
    BestAvailable,
    /// Extract audio to mp3.
    Mp3,
    /// Extract audio to mp3, eligible for merging a playlist into one file.
    Mp3Complete,
}

impl MediaFormat {
    pub fn is_audio(self) -> bool {
        matches!(self, MediaFormat::Mp3 | MediaFormat::Mp3Complete)
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaFormat::Mp4 => "🎬 mp4 (Video)",
            MediaFormat::BestAvailable => "✨ Best available",
            MediaFormat::Mp3 => "🎵 mp3 (Audio)",
            MediaFormat::Mp3Complete => "🎵 mp3 (Complete playlist)",
        }
    }

    pub const ALL: [MediaFormat; 4] = [
        MediaFormat::Mp4,
        MediaFormat::BestAvailable,
        MediaFormat::Mp3,
        MediaFormat::Mp3Complete,
    ];
}

/// Explicit video quality tier. Takes priority over every other format
/// choice when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    P720,
    P1080,
    P1440,
    P2160,
    Best,
    Worst,
}

impl QualityTier {
    /// Height-bounded selector with graceful fallback to `best`.
    pub fn base_selector(self) -> &'static str {
        match self {
            QualityTier::P720 => "best[height<=720]/best",
            QualityTier::P1080 => "best[height<=1080]/best",
            QualityTier::P1440 => "best[height<=1440]/best",
            QualityTier::P2160 => "best[height<=2160]/best",
            QualityTier::Best => "best",
            QualityTier::Worst => "worst",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::P720 => "720p (HD)",
            QualityTier::P1080 => "1080p (Full HD)",
            QualityTier::P1440 => "1440p (2K)",
            QualityTier::P2160 => "2160p (4K)",
            QualityTier::Best => "Best available",
            QualityTier::Worst => "Smallest file",
        }
    }

    pub const ALL: [QualityTier; 6] = [
        QualityTier::P720,
        QualityTier::P1080,
        QualityTier::P1440,
        QualityTier::P2160,
        QualityTier::Best,
        QualityTier::Worst,
    ];
}

/// Audio encoder quality for `-x` extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioQuality {
    /// Best VBR the encoder offers.
    #[default]
    Best,
    Kbps320,
    Kbps256,
    Kbps192,
    Kbps128,
}

impl AudioQuality {
    /// Value passed to the extraction tool's `--audio-quality` flag.
    pub fn encoder_param(self) -> &'static str {
        match self {
            AudioQuality::Best => "0",
            AudioQuality::Kbps320 => "320K",
            AudioQuality::Kbps256 => "256K",
            AudioQuality::Kbps192 => "192K",
            AudioQuality::Kbps128 => "128K",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AudioQuality::Best => "Best (VBR)",
            AudioQuality::Kbps320 => "320 kbps",
            AudioQuality::Kbps256 => "256 kbps",
            AudioQuality::Kbps192 => "192 kbps",
            AudioQuality::Kbps128 => "128 kbps",
        }
    }

    pub const ALL: [AudioQuality; 5] = [
        AudioQuality::Best,
        AudioQuality::Kbps320,
        AudioQuality::Kbps256,
        AudioQuality::Kbps192,
        AudioQuality::Kbps128,
    ];
}

/// Fixed table of selectable file-size ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeLimit {
    M50,
    M100,
    M250,
    M500,
    G1,
    G2,
}

impl SizeLimit {
    /// Value used inside the format-selector filter clause.
    pub fn filter_value(self) -> &'static str {
        match self {
            SizeLimit::M50 => "50M",
            SizeLimit::M100 => "100M",
            SizeLimit::M250 => "250M",
            SizeLimit::M500 => "500M",
            SizeLimit::G1 => "1G",
            SizeLimit::G2 => "2G",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeLimit::M50 => "50 MB",
            SizeLimit::M100 => "100 MB",
            SizeLimit::M250 => "250 MB",
            SizeLimit::M500 => "500 MB",
            SizeLimit::G1 => "1 GB",
            SizeLimit::G2 => "2 GB",
        }
    }

    pub const ALL: [SizeLimit; 6] = [
        SizeLimit::M50,
        SizeLimit::M100,
        SizeLimit::M250,
        SizeLimit::M500,
        SizeLimit::G1,
        SizeLimit::G2,
    ];
}

/// Directory-layout policy for output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Organization {
    /// Everything directly in the destination directory.
    #[default]
    None,
    ByDate,
    ByChannel,
    ByType,
    ByPlaylist,
}

impl Organization {
    /// Path-template directory segment prepended ahead of the base filename.
    /// `ByType` is the only segment resolved at build time; the rest are
    /// expanded by the extraction tool.
    pub fn dir_template(self, format: MediaFormat) -> Option<&'static str> {
        match self {
            Organization::None => None,
            Organization::ByDate => Some("%(upload_date)s"),
            Organization::ByChannel => Some("%(uploader)s"),
            Organization::ByType => Some(if format.is_audio() { "Audio" } else { "Video" }),
            Organization::ByPlaylist => Some("%(playlist_title)s"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Organization::None => "No folders",
            Organization::ByDate => "By upload date",
            Organization::ByChannel => "By channel",
            Organization::ByType => "By type (Audio/Video)",
            Organization::ByPlaylist => "By playlist",
        }
    }

    pub const ALL: [Organization; 5] = [
        Organization::None,
        Organization::ByDate,
        Organization::ByChannel,
        Organization::ByType,
        Organization::ByPlaylist,
    ];
}

/// Flat option set for one download request. Constructed fresh from UI
/// state per submission; immutable once handed to the command builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    pub format: MediaFormat,
    pub quality: Option<QualityTier>,
    pub audio_quality: AudioQuality,
    pub is_playlist: bool,
    pub channel_mode: bool,
    pub playlist_limit: Option<u32>,
    pub playlist_numbering: bool,
    pub duration_filter: bool,
    pub duration_min: Option<u32>,
    pub duration_max: Option<u32>,
    pub max_filesize: Option<SizeLimit>,
    pub skip_shorts: bool,
    pub organization: Organization,
    pub write_metadata: bool,
    pub write_thumbnail: bool,
    pub embed_metadata: bool,
    pub subtitle_langs: Vec<String>,
    pub retries: Option<u32>,
    pub use_archive: bool,
    pub merge_playlist: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            format: MediaFormat::default(),
            quality: None,
            audio_quality: AudioQuality::default(),
            is_playlist: false,
            channel_mode: false,
            playlist_limit: None,
            playlist_numbering: false,
            duration_filter: false,
            duration_min: None,
            duration_max: None,
            max_filesize: None,
            skip_shorts: false,
            organization: Organization::default(),
            write_metadata: false,
            write_thumbnail: false,
            embed_metadata: false,
            subtitle_langs: Vec::new(),
            retries: None,
            use_archive: false,
            merge_playlist: false,
        }
    }
}

impl DownloadOptions {
    /// True when a finished playlist batch should be stitched into one file.
    pub fn wants_merge(&self) -> bool {
        self.format == MediaFormat::Mp3Complete && self.is_playlist && self.merge_playlist
    }
}
