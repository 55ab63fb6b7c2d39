#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lastic_engine::{
    CancellationToken, DownloadRequest, EngineConfig, EngineError, EngineEvent, Extractor,
    ProgressSink, TransferStatus, YtDlpExtractor,
};
use tempfile::TempDir;

const FAKE_TOOL: &str = r#"#!/bin/sh
case "$*" in
  *--dump-single-json*)
    echo '{"title":"Fake Clip","id":"abc","extractor_key":"Generic","duration":12.5}'
    exit 0
    ;;
  *fail.example*)
    echo "ERROR: [generic] Unsupported URL: https://fail.example" >&2
    exit 1
    ;;
  *latin1.example*)
    printf '[download] Destination: caf\351.mp4\n'
    printf 'LASTIC_PROGRESS|downloading|5|10|NA|50.0%%|caf\351|NA\n' >&2
    echo 'LASTIC_TITLE|Clip'
    exit 0
    ;;
  *slow.example*)
    echo "LASTIC_PROGRESS|downloading|1|100|NA|1.0%|NA|NA" >&2
    sleep 30
    exit 0
    ;;
esac
echo "[download] Destination: Fake Clip.mp4"
echo "LASTIC_PROGRESS|downloading|512|1024|NA| 50.0%|1.00MiB/s|00:01" >&2
echo "LASTIC_PROGRESS|finished|1024|1024|NA|100.0%|NA|NA" >&2
echo "LASTIC_TITLE|Fake Clip"
"#;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn install_fake_tool(dir: &Path) -> PathBuf {
    let path = dir.join("fake-yt-dlp");
    fs::write(&path, FAKE_TOOL).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn extractor(temp: &TempDir) -> YtDlpExtractor {
    let program = install_fake_tool(temp.path());
    YtDlpExtractor::new(
        EngineConfig::default()
            .with_program(program)
            .with_download_dir(temp.path().join("out")),
    )
}

fn request(url: &str) -> DownloadRequest {
    DownloadRequest {
        url: url.to_string(),
        format_selector: "bestvideo+bestaudio/best".to_string(),
        audio: None,
    }
}

#[tokio::test]
async fn fetch_info_parses_tool_json() {
    let temp = TempDir::new().unwrap();
    let info = extractor(&temp)
        .fetch_info("https://ok.example/v")
        .await
        .expect("info");

    assert_eq!(info.title, "Fake Clip");
    assert_eq!(info.extractor.as_deref(), Some("Generic"));
    assert_eq!(info.duration_secs, Some(12.5));
}

#[tokio::test]
async fn download_streams_progress_and_reports_title() {
    let temp = TempDir::new().unwrap();
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let outcome = extractor(&temp)
        .download(4, &request("https://ok.example/v"), &sink, &cancel)
        .await
        .expect("download");

    assert_eq!(outcome.title, "Fake Clip");
    assert!(temp.path().join("out").is_dir());

    let events = sink.take();
    assert!(matches!(
        events.first(),
        Some(EngineEvent::DownloadStarted { download_id: 4, .. })
    ));
    let statuses: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress { progress, .. } => Some(progress.status),
            _ => None,
        })
        .collect();
    assert_eq!(
        statuses,
        vec![TransferStatus::Downloading, TransferStatus::Finished]
    );
}

#[tokio::test]
async fn non_utf8_output_does_not_abort_download() {
    let temp = TempDir::new().unwrap();
    let sink = TestSink::default();

    let outcome = extractor(&temp)
        .download(
            5,
            &request("https://latin1.example/v"),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect("download");

    assert_eq!(outcome.title, "Clip");
    let progress: Vec<_> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::Progress { progress, .. } => Some(progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].downloaded_bytes, Some(5));
    assert_eq!(progress[0].speed_str.as_deref(), Some("caf\u{fffd}"));
}

#[tokio::test]
async fn failing_tool_reports_its_error_line() {
    let temp = TempDir::new().unwrap();
    let sink = TestSink::default();

    let err = extractor(&temp)
        .download(1, &request("https://fail.example"), &sink, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        EngineError::Exit { code, message } => {
            assert_eq!(code, Some(1));
            assert_eq!(message, "[generic] Unsupported URL: https://fail.example");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_kills_running_tool() {
    let temp = TempDir::new().unwrap();
    let sink = TestSink::default();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = extractor(&temp)
        .download(2, &request("https://slow.example"), &sink, &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn missing_tool_is_reported() {
    let temp = TempDir::new().unwrap();
    let extractor = YtDlpExtractor::new(
        EngineConfig::default().with_program(temp.path().join("does-not-exist")),
    );

    let err = extractor.fetch_info("https://ok.example").await.unwrap_err();

    assert!(matches!(err, EngineError::ToolNotFound { .. }));
}
