//! Locating the external tools and the directories they live in.

use std::path::{Path, PathBuf};
use std::process::Command;

use meow_logging::meow_warn;

/// Appends the platform executable suffix.
pub fn platform_bin(name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Directory for managed binaries, next to the executable. Created as a
/// side effect of locating it.
pub fn bin_dir() -> PathBuf {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let dir = base.join("bin");
    if let Err(err) = std::fs::create_dir_all(&dir) {
        meow_warn!("Could not create bin dir {:?}: {}", dir, err);
    }
    dir
}

pub fn managed_ffmpeg_path() -> PathBuf {
    bin_dir().join(platform_bin("ffmpeg"))
}

/// Managed binary first, then the system path.
pub fn resolve_ffmpeg() -> Option<PathBuf> {
    let managed = managed_ffmpeg_path();
    if managed.exists() {
        return Some(managed);
    }
    which::which("ffmpeg").ok()
}

pub fn resolve_ytdlp() -> Option<PathBuf> {
    which::which("yt-dlp").ok()
}

/// Runs `binary arg` and returns the first non-empty output line, or None
/// when the probe fails in any way.
pub fn probe_version(binary: &Path, arg: &str) -> Option<String> {
    let output = Command::new(binary).arg(arg).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
}

/// Cross-platform default download folder: `~/Downloads` when it exists,
/// otherwise the current directory.
pub fn default_download_dir() -> PathBuf {
    let home = if cfg!(target_os = "windows") {
        std::env::var_os("USERPROFILE")
    } else {
        std::env::var_os("HOME")
    };
    if let Some(home) = home {
        let downloads = PathBuf::from(home).join("Downloads");
        if downloads.is_dir() {
            return downloads;
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
