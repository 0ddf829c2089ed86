//! MeowDown engine: every side effect lives here. Dependency bootstrap,
//! subprocess execution, playlist merging and filesystem helpers.
mod bootstrap;
mod download;
mod engine;
mod extract;
mod merge;
mod persist;
mod runner;
mod tools;
mod types;

pub use bootstrap::{check_dependencies, DependencyReport};
pub use download::{ChannelProgressSink, DownloadSettings, HttpDownloader, ProgressSink};
pub use engine::EngineHandle;
pub use extract::{extract_archive, find_binary};
pub use merge::merge_tracks;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use tools::{
    bin_dir, default_download_dir, managed_ffmpeg_path, platform_bin, probe_version,
    resolve_ffmpeg, resolve_ytdlp,
};
pub use types::{DependencyError, EngineEvent, MergeError, SubprocessError};
