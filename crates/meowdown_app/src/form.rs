//! Widget-bound form state. The form owns plain values the immediate-mode
//! widgets can mutate; a fresh `DownloadOptions` is assembled from it on
//! every submission.

use meowdown_core::{
    AudioQuality, DownloadOptions, MediaFormat, Organization, QualityTier, SizeLimit,
};

pub struct FormState {
    pub url_input: String,
    pub destination: String,
    pub format: MediaFormat,
    pub use_quality_tier: bool,
    pub quality: QualityTier,
    pub audio_quality: AudioQuality,
    pub is_playlist: bool,
    pub channel_mode: bool,
    pub limit_enabled: bool,
    pub limit: u32,
    pub playlist_numbering: bool,
    pub duration_filter: bool,
    pub duration_min: u32,
    pub duration_max: u32,
    pub size_limit_enabled: bool,
    pub size_limit: SizeLimit,
    pub skip_shorts: bool,
    pub organization: Organization,
    pub write_metadata: bool,
    pub write_thumbnail: bool,
    pub embed_metadata: bool,
    pub subtitles: String,
    pub retries_enabled: bool,
    pub retries: u32,
    pub use_archive: bool,
    pub merge_playlist: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            destination: String::new(),
            format: MediaFormat::default(),
            use_quality_tier: false,
            quality: QualityTier::P1080,
            audio_quality: AudioQuality::default(),
            is_playlist: false,
            channel_mode: false,
            limit_enabled: false,
            limit: 25,
            playlist_numbering: false,
            duration_filter: false,
            duration_min: 30,
            duration_max: 3600,
            size_limit_enabled: false,
            size_limit: SizeLimit::M500,
            skip_shorts: false,
            organization: Organization::default(),
            write_metadata: false,
            write_thumbnail: false,
            embed_metadata: false,
            subtitles: String::new(),
            retries_enabled: false,
            retries: 10,
            use_archive: false,
            merge_playlist: false,
        }
    }
}

impl FormState {
    /// Snapshot of the form as an immutable option set.
    pub fn to_options(&self) -> DownloadOptions {
        DownloadOptions {
            format: self.format,
            quality: self.use_quality_tier.then_some(self.quality),
            audio_quality: self.audio_quality,
            is_playlist: self.is_playlist,
            channel_mode: self.channel_mode,
            playlist_limit: self.limit_enabled.then_some(self.limit),
            playlist_numbering: self.playlist_numbering,
            duration_filter: self.duration_filter,
            duration_min: self.duration_filter.then_some(self.duration_min),
            duration_max: self.duration_filter.then_some(self.duration_max),
            max_filesize: self.size_limit_enabled.then_some(self.size_limit),
            skip_shorts: self.skip_shorts,
            organization: self.organization,
            write_metadata: self.write_metadata,
            write_thumbnail: self.write_thumbnail,
            embed_metadata: self.embed_metadata,
            subtitle_langs: parse_langs(&self.subtitles),
            retries: self.retries_enabled.then_some(self.retries),
            use_archive: self.use_archive,
            merge_playlist: self.merge_playlist,
        }
    }

    /// Restores the widgets from a previously saved option set.
    pub fn apply_options(&mut self, options: &DownloadOptions) {
        self.format = options.format;
        self.use_quality_tier = options.quality.is_some();
        if let Some(quality) = options.quality {
            self.quality = quality;
        }
        self.audio_quality = options.audio_quality;
        self.is_playlist = options.is_playlist;
        self.channel_mode = options.channel_mode;
        self.limit_enabled = options.playlist_limit.is_some();
        if let Some(limit) = options.playlist_limit {
            self.limit = limit;
        }
        self.playlist_numbering = options.playlist_numbering;
        self.duration_filter = options.duration_filter;
        if let Some(min) = options.duration_min {
            self.duration_min = min;
        }
        if let Some(max) = options.duration_max {
            self.duration_max = max;
        }
        self.size_limit_enabled = options.max_filesize.is_some();
        if let Some(limit) = options.max_filesize {
            self.size_limit = limit;
        }
        self.skip_shorts = options.skip_shorts;
        self.organization = options.organization;
        self.write_metadata = options.write_metadata;
        self.write_thumbnail = options.write_thumbnail;
        self.embed_metadata = options.embed_metadata;
        self.subtitles = options.subtitle_langs.join(",");
        self.retries_enabled = options.retries.is_some();
        if let Some(retries) = options.retries {
            self.retries = retries;
        }
        self.use_archive = options.use_archive;
        self.merge_playlist = options.merge_playlist;
    }
}

fn parse_langs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
