use crate::state::SessionState;

/// Render-ready snapshot of the application state. Front-ends read this and
/// never reach into `AppState` directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    /// Completion fraction of the current job, 0.0..=1.0.
    pub fraction: f32,
    /// Status line shown next to the progress bar.
    pub status: String,
    pub queue_len: usize,
    /// 0-based index of the job currently running.
    pub current_index: usize,
    pub completed: usize,
    pub failed: usize,
    pub deps_verified: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn busy(&self) -> bool {
        self.session != SessionState::Idle
    }
}
