use std::sync::Once;

use meowdown_core::{apply_line, ProgressEvent, ProgressState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(meow_logging::initialize_for_tests);
}

#[test]
fn destination_line_is_recognized_without_moving_the_fraction() {
    init_logging();
    let state = ProgressState {
        fraction: 0.3,
        message: String::new(),
    };
    let (next, event) = apply_line(
        &state,
        "[download] Destination: /tmp/🎬Cute Cats.mp4",
    );

    assert_eq!(event, ProgressEvent::DestinationFound);
    assert_eq!(next.fraction, 0.3);
    assert!(next.message.contains("Found the video"));
}

#[test]
fn already_downloaded_forces_completion() {
    init_logging();
    let state = ProgressState::default();
    let (next, event) = apply_line(
        &state,
        "[download] /tmp/🎬Cute Cats.mp4 has already been downloaded",
    );

    assert_eq!(event, ProgressEvent::AlreadyDownloaded);
    assert_eq!(next.fraction, 1.0);
}

#[test]
fn percent_lines_update_fraction_and_pick_tier_messages() {
    init_logging();
    let state = ProgressState::default();

    let (next, event) = apply_line(&state, "[download]  12.0% of 10.00MiB at 1.00MiB/s");
    assert_eq!(event, ProgressEvent::Percent(0.12));
    assert!(next.message.contains("*curious meow*"));

    let (next, _) = apply_line(&next, "[download]  42.7% of 10.00MiB at 1.00MiB/s");
    assert!((next.fraction - 0.427).abs() < 1e-6);
    assert!(next.message.contains("Getting there"));

    let (next, _) = apply_line(&next, "[download]  60.0% of 10.00MiB at 1.00MiB/s");
    assert!(next.message.contains("Almost done"));

    let (next, _) = apply_line(&next, "[download]  90.0% of 10.00MiB at 1.00MiB/s");
    assert!(next.message.contains("So close"));
}

#[test]
fn one_hundred_percent_completes_the_bar() {
    init_logging();
    let state = ProgressState::default();
    let (next, event) = apply_line(&state, "[download] 100% of 10.00MiB in 00:07");

    assert_eq!(event, ProgressEvent::Percent(1.0));
    assert_eq!(next.fraction, 1.0);
}

#[test]
fn percent_above_one_hundred_clamps() {
    init_logging();
    let state = ProgressState::default();
    let (next, _) = apply_line(&state, "[download] 250% of something odd");
    assert_eq!(next.fraction, 1.0);
}

#[test]
fn transcoder_lines_keep_the_fraction() {
    init_logging();
    let state = ProgressState {
        fraction: 0.8,
        message: String::new(),
    };
    let (next, event) = apply_line(&state, "[ffmpeg] Destination: /tmp/🎵Song.mp3");

    assert_eq!(event, ProgressEvent::Transcoding);
    assert_eq!(next.fraction, 0.8);
    assert!(next.message.contains("FFmpeg"));
}

#[test]
fn unrecognized_lines_leave_state_untouched() {
    init_logging();
    let state = ProgressState {
        fraction: 0.5,
        message: "steady".to_string(),
    };
    for line in [
        "[youtube] abc123: Downloading webpage",
        "WARNING: unable to extract channel id",
        "",
        "random noise",
    ] {
        let (next, event) = apply_line(&state, line);
        assert_eq!(event, ProgressEvent::Ignored, "line {line:?}");
        assert_eq!(next, state);
    }
}

#[test]
fn backward_fractions_are_accepted_across_playlist_items() {
    init_logging();
    let state = ProgressState::default();
    let (state, _) = apply_line(&state, "[download]  80.0% of item one");
    let (state, _) = apply_line(&state, "[download]  10.0% of item two");
    assert!((state.fraction - 0.10).abs() < 1e-6);
}

#[test]
fn reset_returns_to_zero() {
    init_logging();
    let state = ProgressState {
        fraction: 0.9,
        message: String::new(),
    };
    let fresh = ProgressState::reset("new job");
    assert_eq!(fresh.fraction, 0.0);
    assert_eq!(fresh.message, "new job");
    assert_ne!(state, fresh);
}
