use std::path::{Path, PathBuf};

use crate::command::{build_command, merge_directory};
use crate::progress::{self, ProgressEvent, ProgressState};
use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            state.set_url_input(input);
            Vec::new()
        }
        Msg::DestinationChanged(destination) => {
            state.set_destination(destination);
            Vec::new()
        }
        Msg::OptionsChanged(options) => {
            state.set_options(options);
            Vec::new()
        }
        Msg::DownloadClicked => handle_download_clicked(&mut state),
        Msg::BootstrapProgress { fraction, message } => {
            if state.session() == SessionState::Preparing {
                state.set_progress(ProgressState { fraction, message });
            }
            Vec::new()
        }
        Msg::DependenciesReady { result } => handle_dependencies_ready(&mut state, result),
        Msg::JobStarted { index } => {
            if state.session() == SessionState::Downloading {
                let message = if state.queue().len() > 1 {
                    format!(
                        "🐱 Fetching item {} of {}... *purr*",
                        index + 1,
                        state.queue().len()
                    )
                } else {
                    "🐱 Fetching video info... *purr*".to_string()
                };
                state.set_progress(ProgressState::reset(message));
            }
            Vec::new()
        }
        Msg::JobLine(line) => {
            if state.session() == SessionState::Downloading {
                let (next, event) = progress::apply_line(state.progress(), &line);
                if event != ProgressEvent::Ignored {
                    state.set_progress(next);
                }
            }
            Vec::new()
        }
        Msg::JobFinished { success } => handle_job_finished(&mut state, success),
        Msg::MergeFinished { result } => {
            if state.session() != SessionState::Merging {
                return (state, Vec::new());
            }
            state.set_session(SessionState::Idle);
            match result {
                Ok(Some(path)) => {
                    state.set_status(format!("🎉 Playlist mix ready: {path} *victory purr*"));
                }
                Ok(None) => {
                    state.set_status("😺 Tracks are ready! Nothing needed merging.");
                }
                Err(err) => {
                    state.set_status(format!("😿 Merge failed: {err} (your tracks are kept)"));
                }
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn handle_download_clicked(state: &mut AppState) -> Vec<Effect> {
    if state.session() != SessionState::Idle {
        return Vec::new();
    }
    let urls = parse_urls(state.url_input());
    if urls.is_empty() {
        state.set_status("🙀 Meow! Please paste a URL first!");
        return Vec::new();
    }
    // Syntactic validation happens before any effect is emitted; a bad URL
    // never reaches a subprocess.
    if let Some(bad) = urls.iter().find(|url| !is_valid_url(url)) {
        state.set_status(format!(
            "😿 That doesn't look like a URL: {bad} *confused meow*"
        ));
        return Vec::new();
    }

    state.start_batch(urls);
    if state.deps_verified() {
        state.set_session(SessionState::Downloading);
        state.set_progress(ProgressState::reset("😸 Starting download... *excited purr*"));
        vec![run_download_effect(state, 0)]
    } else {
        state.set_session(SessionState::Preparing);
        state.set_status("🐱 Checking dependencies... *sniff sniff*");
        vec![Effect::EnsureDependencies]
    }
}

fn handle_dependencies_ready(state: &mut AppState, result: Result<(), String>) -> Vec<Effect> {
    match result {
        Ok(()) if state.session() == SessionState::Preparing => {
            state.mark_deps_verified();
            state.set_session(SessionState::Downloading);
            state.set_progress(ProgressState::reset("😸 All dependencies ready!"));
            vec![run_download_effect(state, 0)]
        }
        Ok(()) => {
            state.mark_deps_verified();
            Vec::new()
        }
        Err(err) => {
            state.abort_batch();
            state.set_session(SessionState::Idle);
            state.set_status(format!("😿 {err}"));
            Vec::new()
        }
    }
}

fn handle_job_finished(state: &mut AppState, success: bool) -> Vec<Effect> {
    if state.session() != SessionState::Downloading {
        return Vec::new();
    }
    state.record_job_result(success);

    let next = state.current_index();
    if next < state.queue().len() {
        return vec![run_download_effect(state, next)];
    }

    let total = state.queue().len();
    let failed = state.failed();
    if state.completed() > 0 && state.options().wants_merge() {
        state.set_session(SessionState::Merging);
        state.set_status("🎵 Stitching the playlist together... *focused meow*");
        let directory = merge_directory(Path::new(state.destination()), state.options());
        return vec![Effect::MergeTracks {
            directory,
            extension: "mp3".to_string(),
        }];
    }

    state.set_session(SessionState::Idle);
    if failed == 0 {
        state.set_status("🎉 Download complete! *victory purr* 🎉");
    } else {
        state.set_status(format!(
            "😿 Meow! {failed} of {total} downloads failed. Check your URLs!"
        ));
    }
    Vec::new()
}

fn run_download_effect(state: &AppState, index: usize) -> Effect {
    let destination = PathBuf::from(state.destination());
    let args = build_command(&state.queue()[index], &destination, state.options());
    Effect::RunDownload {
        index,
        total: state.queue().len(),
        args,
        destination,
    }
}

fn parse_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn is_valid_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}
