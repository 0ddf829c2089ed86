use crate::options::DownloadOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User picked or typed a new destination directory.
    DestinationChanged(String),
    /// User changed any option in the form.
    OptionsChanged(DownloadOptions),
    /// User submitted the current input for downloading.
    DownloadClicked,
    /// Fractional progress of the dependency bootstrap.
    BootstrapProgress { fraction: f32, message: String },
    /// Engine finished (or failed) the dependency bootstrap.
    DependenciesReady { result: Result<(), String> },
    /// Engine spawned the subprocess for queue item `index` (0-based).
    JobStarted { index: usize },
    /// One line of combined subprocess output.
    JobLine(String),
    /// Subprocess exited; `success` reflects the exit code.
    JobFinished { success: bool },
    /// Playlist-mix step finished; `Ok(None)` means nothing to merge.
    MergeFinished { result: Result<Option<String>, String> },
    /// UI/render tick to coalesce rendering.
    Tick,
}
