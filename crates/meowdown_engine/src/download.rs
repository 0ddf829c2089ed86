//! Streamed HTTP download of dependency archives, with fractional progress
//! reported through a sink.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;

use crate::{DependencyError, EngineEvent};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            // Archive downloads are large; allow plenty of time.
            request_timeout: Duration::from_secs(600),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    settings: DownloadSettings,
}

impl HttpDownloader {
    pub fn new(settings: DownloadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DependencyError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| DependencyError::Download(err.to_string()))
    }

    /// Streams `url` into `dest`, emitting progress scaled into the
    /// `start_progress..end_progress` window so the bootstrap can reserve
    /// headroom for the extraction step.
    pub async fn fetch_to_file(
        &self,
        url: &str,
        dest: &Path,
        sink: &dyn ProgressSink,
        label: &str,
        start_progress: f32,
        end_progress: f32,
    ) -> Result<u64, DependencyError> {
        let client = self.build_client()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?
            .error_for_status()
            .map_err(map_reqwest_error)?;

        let total_size = response.content_length();
        let mut file = File::create(dest)?;
        let mut downloaded: u64 = 0;

        sink.emit(EngineEvent::BootstrapProgress {
            fraction: start_progress,
            message: label.to_string(),
        });

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            if let Some(total) = total_size {
                if total > 0 {
                    let ratio = (downloaded as f64 / total as f64).clamp(0.0, 1.0) as f32;
                    sink.emit(EngineEvent::BootstrapProgress {
                        fraction: start_progress + (end_progress - start_progress) * ratio,
                        message: label.to_string(),
                    });
                }
            }
        }
        file.flush()?;

        sink.emit(EngineEvent::BootstrapProgress {
            fraction: end_progress,
            message: label.to_string(),
        });
        Ok(downloaded)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DependencyError {
    if err.is_timeout() {
        return DependencyError::Download("timed out".to_string());
    }
    DependencyError::Download(err.to_string())
}
