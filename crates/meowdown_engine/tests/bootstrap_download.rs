use std::fs;
use std::io::Write;
use std::sync::{Mutex, Once};
use std::time::Duration;

use meowdown_engine::{
    extract_archive, find_binary, DownloadSettings, EngineEvent, HttpDownloader, ProgressSink,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(meow_logging::initialize_for_tests);
}

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn fractions(&self) -> Vec<f32> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::BootstrapProgress { fraction, .. } => Some(*fraction),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test]
async fn downloader_streams_to_file_and_reports_scaled_progress() {
    init_logging();
    let server = MockServer::start().await;
    let body = vec![0xABu8; 4096];
    Mock::given(method("GET"))
        .and(path("/ffmpeg.zip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.clone(), "application/zip"),
        )
        .mount(&server)
        .await;

    let downloader = HttpDownloader::new(DownloadSettings::default());
    let sink = TestSink::default();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("ffmpeg.zip");

    let bytes = downloader
        .fetch_to_file(
            &format!("{}/ffmpeg.zip", server.uri()),
            &dest,
            &sink,
            "downloading",
            0.0,
            0.7,
        )
        .await
        .expect("download ok");

    assert_eq!(bytes, 4096);
    assert_eq!(fs::read(&dest).unwrap(), body);

    let fractions = sink.fractions();
    assert_eq!(fractions.first(), Some(&0.0));
    assert_eq!(fractions.last(), Some(&0.7));
    // Scaled into the requested window, never past it.
    assert!(fractions.iter().all(|f| (0.0..=0.7).contains(f)));
}

#[tokio::test]
async fn downloader_fails_on_http_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let downloader = HttpDownloader::new(DownloadSettings::default());
    let sink = TestSink::default();
    let temp = TempDir::new().unwrap();

    let err = downloader
        .fetch_to_file(
            &format!("{}/missing.zip", server.uri()),
            &temp.path().join("missing.zip"),
            &sink,
            "downloading",
            0.0,
            1.0,
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to download ffmpeg"));
}

#[tokio::test]
async fn downloader_times_out_on_slow_response() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = DownloadSettings {
        request_timeout: Duration::from_millis(50),
        ..DownloadSettings::default()
    };
    let downloader = HttpDownloader::new(settings);
    let sink = TestSink::default();
    let temp = TempDir::new().unwrap();

    let err = downloader
        .fetch_to_file(
            &format!("{}/slow.zip", server.uri()),
            &temp.path().join("slow.zip"),
            &sink,
            "downloading",
            0.0,
            1.0,
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("timed out"));
}

#[test]
fn zip_archives_extract_and_nested_binaries_are_found() {
    init_logging();
    let temp = TempDir::new().unwrap();

    // Archive layouts nest the binary a few levels down.
    let archive_path = temp.path().join("ffmpeg.zip");
    let file = fs::File::create(&archive_path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options: zip::write::SimpleFileOptions = Default::default();
    zip.add_directory("ffmpeg-release/bin/", options).unwrap();
    zip.start_file("ffmpeg-release/bin/ffmpeg", options).unwrap();
    zip.write_all(b"#!/bin/sh\nexit 0\n").unwrap();
    zip.start_file("ffmpeg-release/README.txt", options).unwrap();
    zip.write_all(b"docs").unwrap();
    zip.finish().unwrap();

    let out = temp.path().join("extracted");
    fs::create_dir_all(&out).unwrap();
    extract_archive(&archive_path, &out).expect("extract ok");

    let found = find_binary(&out, "ffmpeg").expect("binary located");
    assert!(found.ends_with("ffmpeg-release/bin/ffmpeg"));
    assert!(find_binary(&out, "ffprobe").is_none());
}

#[test]
fn unknown_archive_formats_are_rejected() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let archive_path = temp.path().join("ffmpeg.rar");
    fs::write(&archive_path, b"not really an archive").unwrap();

    let err = extract_archive(&archive_path, temp.path()).unwrap_err();
    assert!(err.to_string().contains("unrecognized archive format"));
}
