//! Command-line front-end: the download form as flags, driving the same
//! core state machine and engine as the desktop app.

use std::path::PathBuf;

use clap::Parser;
use meowdown_core::{
    update, AppState, AppViewModel, AudioQuality, DownloadOptions, Effect, MediaFormat, Msg,
    Organization, QualityTier, SizeLimit,
};
use meowdown_engine::{default_download_dir, EngineEvent, EngineHandle};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(author, version, about = "🐱 MeowDown: cute downloads from the command line", long_about = None)]
struct Cli {
    /// Media URLs to download, one blocking subprocess per URL.
    #[arg(required = true)]
    urls: Vec<String>,

    /// Destination directory (defaults to ~/Downloads).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: mp4, best, mp3, mp3-complete.
    #[arg(short, long, default_value = "mp4", value_parser = parse_format)]
    format: MediaFormat,

    /// Explicit video quality tier: 720p, 1080p, 1440p, 2160p, best, worst.
    #[arg(short, long, value_parser = parse_quality)]
    quality: Option<QualityTier>,

    /// Audio quality for mp3 extraction: best, 320, 256, 192, 128.
    #[arg(long, default_value = "best", value_parser = parse_audio_quality)]
    audio_quality: AudioQuality,

    /// Expand playlists instead of downloading a single item.
    #[arg(long)]
    playlist: bool,

    /// Channel mode: treat each URL as a channel and grab recent uploads.
    #[arg(long)]
    channel: bool,

    /// Cap the number of playlist/channel items.
    #[arg(long)]
    limit: Option<u32>,

    /// Prefix files with a zero-padded ordinal.
    #[arg(long)]
    numbering: bool,

    /// Only accept items at least this long, in seconds.
    #[arg(long)]
    min_duration: Option<u32>,

    /// Only accept items at most this long, in seconds.
    #[arg(long)]
    max_duration: Option<u32>,

    /// Skip files larger than this: 50M, 100M, 250M, 500M, 1G, 2G.
    #[arg(long, value_parser = parse_size)]
    max_size: Option<SizeLimit>,

    /// Skip short content (under a minute).
    #[arg(long)]
    skip_shorts: bool,

    /// Folder layout: none, date, channel, type, playlist.
    #[arg(long, default_value = "none", value_parser = parse_organization)]
    organize: Organization,

    /// Write a metadata file next to each download.
    #[arg(long)]
    write_metadata: bool,

    /// Save the thumbnail next to each download.
    #[arg(long)]
    thumbnail: bool,

    /// Embed metadata (and cover art for audio).
    #[arg(long)]
    embed_metadata: bool,

    /// Subtitle languages to save, comma separated.
    #[arg(long)]
    subs: Option<String>,

    /// Retry count handed to the extraction tool.
    #[arg(long)]
    retries: Option<u32>,

    /// Keep a download history and skip what is already there.
    #[arg(long)]
    archive: bool,

    /// Merge a complete-audio playlist into one file afterwards.
    #[arg(long)]
    merge: bool,

    /// Provide additional information (default only shows errors).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn to_options(&self) -> DownloadOptions {
        DownloadOptions {
            format: self.format,
            quality: self.quality,
            audio_quality: self.audio_quality,
            is_playlist: self.playlist,
            channel_mode: self.channel,
            playlist_limit: self.limit,
            playlist_numbering: self.numbering,
            duration_filter: self.min_duration.is_some() || self.max_duration.is_some(),
            duration_min: self.min_duration,
            duration_max: self.max_duration,
            max_filesize: self.max_size,
            skip_shorts: self.skip_shorts,
            organization: self.organize,
            write_metadata: self.write_metadata,
            write_thumbnail: self.thumbnail,
            embed_metadata: self.embed_metadata,
            subtitle_langs: self
                .subs
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|lang| !lang.is_empty())
                        .map(ToOwned::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            retries: self.retries,
            use_archive: self.archive,
            merge_playlist: self.merge,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let destination = cli
        .output
        .clone()
        .unwrap_or_else(default_download_dir)
        .display()
        .to_string();

    let engine = EngineHandle::new();
    let mut state = AppState::new();
    state = dispatch(&engine, state, Msg::DestinationChanged(destination));
    state = dispatch(&engine, state, Msg::OptionsChanged(cli.to_options()));
    state = dispatch(&engine, state, Msg::InputChanged(cli.urls.join("\n")));
    state = dispatch(&engine, state, Msg::DownloadClicked);

    // Invalid input never reaches the engine; report and stop here.
    if !state.view().busy() {
        anyhow::bail!("{}", state.view().status);
    }

    let mut last_status = String::new();
    state.consume_dirty();
    print_status(&mut last_status, &state.view());

    while state.view().busy() {
        let Some(event) = engine.recv() else {
            anyhow::bail!("engine stopped unexpectedly");
        };
        state = dispatch(&engine, state, map_event(event));
        if state.consume_dirty() {
            print_status(&mut last_status, &state.view());
        }
    }

    let view = state.view();
    if view.failed > 0 {
        anyhow::bail!("{} of {} downloads failed", view.failed, view.queue_len);
    }
    Ok(())
}

/// Applies a message and hands any resulting effects straight to the engine.
fn dispatch(engine: &EngineHandle, state: AppState, msg: Msg) -> AppState {
    let (state, effects) = update(state, msg);
    for effect in effects {
        match effect {
            Effect::EnsureDependencies => engine.ensure_dependencies(),
            Effect::RunDownload {
                index,
                args,
                destination,
                ..
            } => engine.run_download(index, args, destination),
            Effect::MergeTracks {
                directory,
                extension,
            } => engine.merge_tracks(directory, extension),
        }
    }
    state
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BootstrapProgress { fraction, message } => {
            Msg::BootstrapProgress { fraction, message }
        }
        EngineEvent::BootstrapFinished { result } => Msg::DependenciesReady { result },
        EngineEvent::JobStarted { index } => Msg::JobStarted { index },
        EngineEvent::JobOutput { line } => Msg::JobLine(line),
        EngineEvent::JobFinished { success } => Msg::JobFinished { success },
        EngineEvent::MergeFinished { result } => Msg::MergeFinished {
            result: result.map(|path| path.map(|p| p.display().to_string())),
        },
    }
}

fn print_status(last: &mut String, view: &AppViewModel) {
    if view.status != *last {
        println!("{}", view.status);
        *last = view.status.clone();
    }
}

fn parse_format(raw: &str) -> Result<MediaFormat, String> {
    match raw {
        "mp4" => Ok(MediaFormat::Mp4),
        "best" => Ok(MediaFormat::BestAvailable),
        "mp3" => Ok(MediaFormat::Mp3),
        "mp3-complete" => Ok(MediaFormat::Mp3Complete),
        other => Err(format!("unknown format: {other}")),
    }
}

fn parse_quality(raw: &str) -> Result<QualityTier, String> {
    match raw {
        "720p" => Ok(QualityTier::P720),
        "1080p" => Ok(QualityTier::P1080),
        "1440p" => Ok(QualityTier::P1440),
        "2160p" | "4k" => Ok(QualityTier::P2160),
        "best" => Ok(QualityTier::Best),
        "worst" => Ok(QualityTier::Worst),
        other => Err(format!("unknown quality tier: {other}")),
    }
}

fn parse_audio_quality(raw: &str) -> Result<AudioQuality, String> {
    match raw {
        "best" => Ok(AudioQuality::Best),
        "320" => Ok(AudioQuality::Kbps320),
        "256" => Ok(AudioQuality::Kbps256),
        "192" => Ok(AudioQuality::Kbps192),
        "128" => Ok(AudioQuality::Kbps128),
        other => Err(format!("unknown audio quality: {other}")),
    }
}

fn parse_size(raw: &str) -> Result<SizeLimit, String> {
    match raw {
        "50M" => Ok(SizeLimit::M50),
        "100M" => Ok(SizeLimit::M100),
        "250M" => Ok(SizeLimit::M250),
        "500M" => Ok(SizeLimit::M500),
        "1G" => Ok(SizeLimit::G1),
        "2G" => Ok(SizeLimit::G2),
        other => Err(format!("unknown size limit: {other}")),
    }
}

fn parse_organization(raw: &str) -> Result<Organization, String> {
    match raw {
        "none" => Ok(Organization::None),
        "date" => Ok(Organization::ByDate),
        "channel" => Ok(Organization::ByChannel),
        "type" => Ok(Organization::ByType),
        "playlist" => Ok(Organization::ByPlaylist),
        other => Err(format!("unknown organization mode: {other}")),
    }
}
