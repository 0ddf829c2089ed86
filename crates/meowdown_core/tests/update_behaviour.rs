use std::path::PathBuf;
use std::sync::Once;

use meowdown_core::{
    update, AppState, DownloadOptions, Effect, MediaFormat, Msg, SessionState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(meow_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::DestinationChanged("/tmp/dl".to_string()));
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::DownloadClicked)
}

fn deps_ok(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::DependenciesReady { result: Ok(()) },
    )
}

#[test]
fn invalid_url_emits_no_effects_and_stays_idle() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "not a url");

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.view().status.contains("doesn't look like a URL"));
}

#[test]
fn empty_input_asks_for_a_url() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "   \n\n");

    assert!(effects.is_empty());
    assert!(state.view().status.contains("paste a URL"));
}

#[test]
fn one_invalid_url_in_a_batch_blocks_the_whole_batch() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "https://a.example.com/v\nnope\nhttps://b.example.com/v");

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
}

#[test]
fn first_submission_checks_dependencies_before_downloading() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "https://example.com/watch?v=abc");

    assert_eq!(state.session(), SessionState::Preparing);
    assert_eq!(effects, vec![Effect::EnsureDependencies]);

    let (state, effects) = deps_ok(state);
    assert_eq!(state.session(), SessionState::Downloading);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::RunDownload {
            index,
            total,
            args,
            destination,
        } => {
            assert_eq!(*index, 0);
            assert_eq!(*total, 1);
            assert_eq!(args.last().map(String::as_str), Some("https://example.com/watch?v=abc"));
            assert_eq!(destination, &PathBuf::from("/tmp/dl"));
        }
        other => panic!("unexpected effect: {other:?}"),
    }
}

#[test]
fn bootstrap_failure_aborts_the_batch() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://example.com/watch?v=abc");
    let (state, effects) = update(
        state,
        Msg::DependenciesReady {
            result: Err("😿 Failed to install yt-dlp".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.view().status.contains("Failed to install"));
}

#[test]
fn verified_dependencies_skip_the_preparing_stage() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://example.com/watch?v=abc");
    let (state, _) = deps_ok(state);
    let (state, _) = update(state, Msg::JobFinished { success: true });
    assert_eq!(state.session(), SessionState::Idle);

    // Second batch goes straight to Downloading.
    let (state, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(state.session(), SessionState::Downloading);
    assert!(matches!(effects[0], Effect::RunDownload { .. }));
}

#[test]
fn batch_runs_one_url_at_a_time() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://a.example.com/v\nhttps://b.example.com/v");
    let (state, effects) = deps_ok(state);
    match &effects[0] {
        Effect::RunDownload { index, total, .. } => {
            assert_eq!((*index, *total), (0, 2));
        }
        other => panic!("unexpected effect: {other:?}"),
    }

    let (state, effects) = update(state, Msg::JobFinished { success: true });
    match &effects[0] {
        Effect::RunDownload { index, args, .. } => {
            assert_eq!(*index, 1);
            assert_eq!(args.last().map(String::as_str), Some("https://b.example.com/v"));
        }
        other => panic!("unexpected effect: {other:?}"),
    }

    let (state, effects) = update(state, Msg::JobFinished { success: false });
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.view().status.contains("1 of 2"));
}

#[test]
fn job_start_resets_progress_for_each_url() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://a.example.com/v\nhttps://b.example.com/v");
    let (state, _) = deps_ok(state);
    let (state, _) = update(state, Msg::JobStarted { index: 0 });
    let (state, _) = update(
        state,
        Msg::JobLine("[download]  55.0% of 10MiB".to_string()),
    );
    assert!((state.view().fraction - 0.55).abs() < 1e-6);

    let (state, _) = update(state, Msg::JobFinished { success: true });
    let (state, _) = update(state, Msg::JobStarted { index: 1 });
    assert_eq!(state.view().fraction, 0.0);
    assert!(state.view().status.contains("item 2 of 2"));
}

#[test]
fn finished_audio_playlist_triggers_the_merge_step() {
    init_logging();
    let options = DownloadOptions {
        format: MediaFormat::Mp3Complete,
        is_playlist: true,
        playlist_numbering: true,
        merge_playlist: true,
        ..DownloadOptions::default()
    };
    let state = AppState::new();
    let (state, _) = update(state, Msg::OptionsChanged(options));
    let (state, _) = submit(state, "https://example.com/playlist?list=PL1");
    let (state, _) = deps_ok(state);
    let (state, effects) = update(state, Msg::JobFinished { success: true });

    assert_eq!(state.session(), SessionState::Merging);
    assert_eq!(
        effects,
        vec![Effect::MergeTracks {
            directory: PathBuf::from("/tmp/dl"),
            extension: "mp3".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::MergeFinished {
            result: Ok(Some("/tmp/dl/🎵 playlist mix.mp3".to_string())),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.view().status.contains("Playlist mix ready"));
}

#[test]
fn failed_merge_keeps_downloads_and_reports() {
    init_logging();
    let options = DownloadOptions {
        format: MediaFormat::Mp3Complete,
        is_playlist: true,
        merge_playlist: true,
        ..DownloadOptions::default()
    };
    let state = AppState::new();
    let (state, _) = update(state, Msg::OptionsChanged(options));
    let (state, _) = submit(state, "https://example.com/playlist?list=PL1");
    let (state, _) = deps_ok(state);
    let (state, _) = update(state, Msg::JobFinished { success: true });
    let (state, _) = update(
        state,
        Msg::MergeFinished {
            result: Err("transcoder exited with status 1".to_string()),
        },
    );

    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.view().status.contains("tracks are kept"));
}

#[test]
fn download_click_is_ignored_while_busy() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://example.com/watch?v=abc");
    let (state, effects) = update(state, Msg::DownloadClicked);

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Preparing);
}

#[test]
fn dirty_flag_coalesces_rendering() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        std::mem::take(&mut state),
        Msg::InputChanged("https://example.com".to_string()),
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    let (mut state, _) = update(std::mem::take(&mut state), Msg::Tick);
    assert!(!state.consume_dirty());
}
