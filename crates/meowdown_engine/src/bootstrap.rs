//! First-run dependency setup: probe the external tools, pip-install the
//! extraction tool and fetch a transcoder build when they are missing.

use std::path::Path;
use std::process::Command;

use meow_logging::{meow_info, meow_warn};

use crate::download::{HttpDownloader, ProgressSink};
use crate::extract::{extract_archive, find_binary};
use crate::tools::{managed_ffmpeg_path, platform_bin, probe_version, resolve_ytdlp};
use crate::{DependencyError, EngineEvent};

/// Platform → transcoder archive, one entry per supported desktop OS.
const FFMPEG_URLS: &[(&str, &str)] = &[
    (
        "windows",
        "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-win64-gpl.zip",
    ),
    ("macos", "https://evermeet.cx/ffmpeg/getrelease/zip"),
    (
        "linux",
        "https://johnvansickle.com/ffmpeg/releases/ffmpeg-release-amd64-static.tar.xz",
    ),
];

/// Availability of the external tools, re-derived by probing on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyReport {
    pub ytdlp: bool,
    pub ffmpeg: bool,
}

impl DependencyReport {
    pub fn all_available(self) -> bool {
        self.ytdlp && self.ffmpeg
    }
}

pub fn check_dependencies() -> DependencyReport {
    let ytdlp = resolve_ytdlp()
        .and_then(|path| probe_version(&path, "--version"))
        .is_some();

    let managed = managed_ffmpeg_path();
    let ffmpeg = if managed.exists() {
        true
    } else {
        probe_version(Path::new("ffmpeg"), "-version").is_some()
    };

    DependencyReport { ytdlp, ffmpeg }
}

/// Installs whatever `check_dependencies` reports missing. Short-circuits
/// when both probes already succeed, so repeated calls are cheap.
pub(crate) fn ensure_dependencies(
    runtime: &tokio::runtime::Runtime,
    downloader: &HttpDownloader,
    sink: &dyn ProgressSink,
) -> Result<(), DependencyError> {
    let report = check_dependencies();
    if report.all_available() {
        meow_info!("dependencies already present, skipping setup");
        return Ok(());
    }

    if !report.ytdlp {
        sink.emit(EngineEvent::BootstrapProgress {
            fraction: 0.0,
            message: "🐱 Installing yt-dlp...".to_string(),
        });
        install_ytdlp()?;
    }

    if !report.ffmpeg {
        install_ffmpeg(runtime, downloader, sink)?;
    }

    sink.emit(EngineEvent::BootstrapProgress {
        fraction: 1.0,
        message: "😸 All dependencies ready!".to_string(),
    });
    Ok(())
}

/// Upgrade-install through the host package manager.
fn install_ytdlp() -> Result<(), DependencyError> {
    let python = if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    };
    meow_info!("installing yt-dlp via {} -m pip", python);
    let output = Command::new(python)
        .args(["-m", "pip", "install", "--upgrade", "yt-dlp"])
        .output()
        .map_err(|err| DependencyError::Install(err.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("pip exited with an error")
            .to_string();
        return Err(DependencyError::Install(reason));
    }
    Ok(())
}

fn platform_archive_url() -> Result<&'static str, DependencyError> {
    let os = std::env::consts::OS;
    FFMPEG_URLS
        .iter()
        .find(|(platform, _)| *platform == os)
        .map(|(_, url)| *url)
        .ok_or_else(|| DependencyError::UnsupportedPlatform(os.to_string()))
}

fn install_ffmpeg(
    runtime: &tokio::runtime::Runtime,
    downloader: &HttpDownloader,
    sink: &dyn ProgressSink,
) -> Result<(), DependencyError> {
    let target = managed_ffmpeg_path();
    if target.exists() {
        return Ok(());
    }

    let url = platform_archive_url()?;
    let archive_name = if url.ends_with(".tar.xz") {
        "ffmpeg.tar.xz"
    } else {
        "ffmpeg.zip"
    };

    let temp = tempfile::tempdir()?;
    let archive_path = temp.path().join(archive_name);

    meow_info!("downloading ffmpeg from {}", url);
    runtime.block_on(downloader.fetch_to_file(
        url,
        &archive_path,
        sink,
        "🐱 Downloading FFmpeg... (this might take a moment)",
        0.0,
        0.7,
    ))?;

    sink.emit(EngineEvent::BootstrapProgress {
        fraction: 0.8,
        message: "🐱 Extracting FFmpeg...".to_string(),
    });
    extract_archive(&archive_path, temp.path())?;

    let wanted = platform_bin("ffmpeg");
    let found = find_binary(temp.path(), &wanted)
        .ok_or_else(|| DependencyError::Extract(url.to_string()))?;
    std::fs::copy(&found, &target)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))?;
    }

    if !target.exists() {
        meow_warn!("ffmpeg copy to {:?} did not materialize", target);
        return Err(DependencyError::Extract(url.to_string()));
    }
    meow_info!("installed ffmpeg at {:?}", target);
    Ok(())
}
