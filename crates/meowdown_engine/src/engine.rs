use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use meow_logging::{meow_info, meow_warn};

use crate::bootstrap;
use crate::download::{ChannelProgressSink, DownloadSettings, HttpDownloader};
use crate::persist::ensure_output_dir;
use crate::runner::run_download;
use crate::tools::{resolve_ffmpeg, resolve_ytdlp};
use crate::{merge_tracks, EngineEvent, MergeError};

enum EngineCommand {
    EnsureDependencies,
    RunDownload {
        index: usize,
        args: Vec<String>,
        destination: PathBuf,
    },
    MergeTracks {
        directory: PathBuf,
        extension: String,
    },
}

/// Handle to the engine worker. Commands are processed strictly in order on
/// a single thread, so there is never more than one subprocess alive.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let downloader = HttpDownloader::new(DownloadSettings::default());
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &downloader, command, &event_tx);
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn ensure_dependencies(&self) {
        let _ = self.cmd_tx.send(EngineCommand::EnsureDependencies);
    }

    pub fn run_download(&self, index: usize, args: Vec<String>, destination: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::RunDownload {
            index,
            args,
            destination,
        });
    }

    pub fn merge_tracks(&self, directory: PathBuf, extension: String) {
        let _ = self.cmd_tx.send(EngineCommand::MergeTracks {
            directory,
            extension,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocking receive, used by the CLI front-end.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    downloader: &HttpDownloader,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::EnsureDependencies => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = bootstrap::ensure_dependencies(runtime, downloader, &sink)
                .map_err(|err| err.to_string());
            if let Err(err) = &result {
                meow_warn!("dependency bootstrap failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::BootstrapFinished { result });
        }
        EngineCommand::RunDownload {
            index,
            args,
            destination,
        } => {
            let _ = event_tx.send(EngineEvent::JobStarted { index });

            if let Err(err) = ensure_output_dir(&destination) {
                meow_warn!("destination {:?} unusable: {}", destination, err);
                let _ = event_tx.send(EngineEvent::JobFinished { success: false });
                return;
            }

            let tool = resolve_ytdlp().unwrap_or_else(|| PathBuf::from("yt-dlp"));
            let args = with_ffmpeg_location(args);

            let success = match run_download(&tool, &args, event_tx) {
                Ok(()) => true,
                Err(err) => {
                    meow_warn!("download failed: {}", err);
                    false
                }
            };
            let _ = event_tx.send(EngineEvent::JobFinished { success });
        }
        EngineCommand::MergeTracks {
            directory,
            extension,
        } => {
            let result = match resolve_ffmpeg() {
                Some(ffmpeg) => merge_tracks(&directory, &extension, &ffmpeg),
                None => Err(MergeError::TranscoderMissing),
            };
            if let Ok(Some(path)) = &result {
                meow_info!("playlist mix written to {:?}", path);
            }
            let _ = event_tx.send(EngineEvent::MergeFinished {
                result: result.map_err(|err| err.to_string()),
            });
        }
    }
}

/// The transcoder location is a filesystem probe, so it is appended here
/// rather than in the pure command builder. The URL stays the final
/// positional argument.
fn with_ffmpeg_location(mut args: Vec<String>) -> Vec<String> {
    if let Some(ffmpeg) = resolve_ffmpeg() {
        let at = args.len().saturating_sub(1);
        args.insert(at, "--ffmpeg-location".to_string());
        args.insert(at + 1, ffmpeg.to_string_lossy().into_owned());
    }
    args
}
