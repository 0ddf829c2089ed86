use crate::options::DownloadOptions;
use crate::progress::ProgressState;
use crate::view_model::AppViewModel;

/// What the session is currently doing. One subprocess at a time; the
/// session moves through Preparing only on the first submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Preparing,
    Downloading,
    Merging,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    url_input: String,
    destination: String,
    options: DownloadOptions,
    session: SessionState,
    deps_verified: bool,
    queue: Vec<String>,
    current: usize,
    completed: usize,
    failed: usize,
    progress: ProgressState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    pub fn deps_verified(&self) -> bool {
        self.deps_verified
    }

    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            fraction: self.progress.fraction,
            status: self.progress.message.clone(),
            queue_len: self.queue.len(),
            current_index: self.current,
            completed: self.completed,
            failed: self.failed,
            deps_verified: self.deps_verified,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url_input(&mut self, input: String) {
        self.url_input = input;
        self.dirty = true;
    }

    pub(crate) fn set_destination(&mut self, destination: String) {
        self.destination = destination;
        self.dirty = true;
    }

    pub(crate) fn set_options(&mut self, options: DownloadOptions) {
        self.options = options;
        self.dirty = true;
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        self.session = session;
        self.dirty = true;
    }

    pub(crate) fn mark_deps_verified(&mut self) {
        self.deps_verified = true;
    }

    pub(crate) fn start_batch(&mut self, urls: Vec<String>) {
        self.queue = urls;
        self.current = 0;
        self.completed = 0;
        self.failed = 0;
        self.dirty = true;
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed
    }

    pub(crate) fn failed(&self) -> usize {
        self.failed
    }

    pub(crate) fn abort_batch(&mut self) {
        self.queue.clear();
        self.current = 0;
        self.dirty = true;
    }

    pub(crate) fn record_job_result(&mut self, success: bool) {
        if success {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
        self.current += 1;
        self.dirty = true;
    }

    pub(crate) fn set_progress(&mut self, progress: ProgressState) {
        self.progress = progress;
        self.dirty = true;
    }

    /// Replaces the status line without touching the fraction.
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        self.progress.message = message.into();
        self.dirty = true;
    }
}
