use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Events flowing from the engine worker back to the front-end.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Fractional progress of the dependency bootstrap.
    BootstrapProgress { fraction: f32, message: String },
    /// Bootstrap outcome; errors are already rendered for display.
    BootstrapFinished { result: Result<(), String> },
    /// The subprocess for queue item `index` was spawned.
    JobStarted { index: usize },
    /// One line of combined stdout/stderr from the running subprocess.
    JobOutput { line: String },
    /// The subprocess exited; `success` reflects the exit code.
    JobFinished { success: bool },
    /// Playlist-mix outcome; `Ok(None)` means nothing needed merging.
    MergeFinished { result: Result<Option<PathBuf>, String> },
}

/// Failures while probing or installing the external tools.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("failed to install yt-dlp: {0}")]
    Install(String),
    #[error("failed to download ffmpeg: {0}")]
    Download(String),
    #[error("ffmpeg binary not found after extracting {0}")]
    Extract(String),
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while running the extraction tool.
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error while running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: ExitStatus },
}

/// Failures in the playlist-mix post-processor.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("transcoder not found; run the dependency setup first")]
    TranscoderMissing,
    #[error("transcoder exited with {0}")]
    TranscoderFailed(ExitStatus),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
