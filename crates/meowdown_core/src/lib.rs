//! MeowDown core: pure state machine, command construction and progress
//! parsing. No I/O happens in this crate.
mod command;
mod effect;
mod msg;
mod options;
mod progress;
mod state;
mod update;
mod view_model;

pub use command::{build_command, merge_directory, ARCHIVE_FILENAME};
pub use effect::Effect;
pub use msg::Msg;
pub use options::{
    AudioQuality, DownloadOptions, MediaFormat, Organization, QualityTier, SizeLimit,
};
pub use progress::{apply_line, ProgressEvent, ProgressState};
pub use state::{AppState, SessionState};
pub use update::update;
pub use view_model::AppViewModel;
