//! Pure parsing of extraction-tool progress lines.
//!
//! A best-effort cosmetic indicator: the parser maps recognized line shapes
//! to a completion fraction and a status message, and silently drops
//! everything else. Success is decided by the subprocess exit code, never by
//! parser state. The fraction may move backward across playlist items; the
//! indicator resets per URL.

use std::sync::OnceLock;

use regex::Regex;

/// Completion fraction (0.0..=1.0) plus the status line shown under the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    pub fraction: f32,
    pub message: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            message: "Ready to pounce! 🐾".to_string(),
        }
    }
}

impl ProgressState {
    /// Fresh state at fraction zero, as required at each job start.
    pub fn reset(message: impl Into<String>) -> Self {
        Self {
            fraction: 0.0,
            message: message.into(),
        }
    }
}

/// What a single output line was recognized as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    DestinationFound,
    AlreadyDownloaded,
    Percent(f32),
    Transcoding,
    Ignored,
}

fn percent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,3}(?:\.\d+)?)%").expect("valid percent regex"))
}

/// Applies one output line to the current state, returning the new state and
/// the recognized event. Unrecognized lines leave the state untouched.
pub fn apply_line(state: &ProgressState, line: &str) -> (ProgressState, ProgressEvent) {
    if line.contains("[download]") {
        if line.contains("Destination:") {
            let next = ProgressState {
                fraction: state.fraction,
                message: "😸 Found the video! Starting download...".to_string(),
            };
            return (next, ProgressEvent::DestinationFound);
        }
        if line.contains("has already been downloaded") {
            let next = ProgressState {
                fraction: 1.0,
                message: "😺 Already have this one! *happy purr*".to_string(),
            };
            return (next, ProgressEvent::AlreadyDownloaded);
        }
        if let Some(captures) = percent_regex().captures(line) {
            let raw: f32 = captures[1].parse().unwrap_or(0.0);
            let fraction = (raw / 100.0).clamp(0.0, 1.0);
            let next = ProgressState {
                fraction,
                message: tier_message(fraction),
            };
            return (next, ProgressEvent::Percent(fraction));
        }
    } else if line.contains("[ffmpeg]") {
        let next = ProgressState {
            fraction: state.fraction,
            message: "🎵 Converting with FFmpeg... *technical meow*".to_string(),
        };
        return (next, ProgressEvent::Transcoding);
    }
    (state.clone(), ProgressEvent::Ignored)
}

fn tier_message(fraction: f32) -> String {
    let pct = fraction * 100.0;
    if fraction < 0.25 {
        format!("🐱 Downloading... {pct:.1}% *curious meow*")
    } else if fraction < 0.5 {
        format!("😺 Getting there... {pct:.1}% *excited purr*")
    } else if fraction < 0.75 {
        format!("😸 Almost done... {pct:.1}% *happy meow*")
    } else {
        format!("😻 So close... {pct:.1}% *anticipating purr*")
    }
}
