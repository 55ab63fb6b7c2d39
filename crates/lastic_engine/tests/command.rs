use std::path::Path;

use lastic_engine::{download_args, info_args, AudioFormat, DownloadRequest, EngineConfig};
use pretty_assertions::assert_eq;

fn config() -> EngineConfig {
    EngineConfig::default()
        .with_program("yt-dlp")
        .with_download_dir("/downloads")
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

#[test]
fn info_args_dump_json_without_downloading() {
    let args = info_args(&config(), "https://video.example/watch?v=1");

    assert!(args.contains(&"--dump-single-json".to_string()));
    assert!(args.contains(&"--skip-download".to_string()));
    assert!(args.contains(&"--no-warnings".to_string()));
    assert_eq!(
        value_after(&args, "--user-agent"),
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
    );
    assert_eq!(
        &args[args.len() - 2..],
        &["--".to_string(), "https://video.example/watch?v=1".to_string()]
    );
}

#[test]
fn download_args_carry_selector_paths_and_markers() {
    let request = DownloadRequest {
        url: "https://video.example/v".to_string(),
        format_selector: "bestvideo[height<=720]+bestaudio/best".to_string(),
        audio: None,
    };
    let args = download_args(&config(), Path::new("/downloads"), &request);

    assert_eq!(
        value_after(&args, "-f"),
        Some("bestvideo[height<=720]+bestaudio/best")
    );
    assert_eq!(value_after(&args, "-P"), Some("home:/downloads"));
    assert_eq!(value_after(&args, "-o"), Some("%(title)s.%(ext)s"));
    assert!(value_after(&args, "--progress-template")
        .unwrap()
        .starts_with("download:LASTIC_PROGRESS|%(progress.status)s|"));
    assert_eq!(
        value_after(&args, "--print"),
        Some("after_move:LASTIC_TITLE|%(title)s")
    );
    assert!(args.contains(&"--newline".to_string()));
    assert!(!args.contains(&"-x".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("https://video.example/v"));
}

#[test]
fn audio_request_adds_extraction_flags() {
    let request = DownloadRequest {
        url: "https://video.example/song".to_string(),
        format_selector: "bestaudio/best".to_string(),
        audio: Some(AudioFormat {
            codec: "mp3".to_string(),
            bitrate_kbps: 192,
        }),
    };
    let args = download_args(&config(), Path::new("/downloads"), &request);

    assert!(args.contains(&"-x".to_string()));
    assert_eq!(value_after(&args, "--audio-format"), Some("mp3"));
    assert_eq!(value_after(&args, "--audio-quality"), Some("192K"));
}

#[test]
fn url_that_looks_like_a_flag_stays_positional() {
    let args = info_args(&config(), "--exec=rm");
    let separator = args.iter().position(|arg| arg == "--").unwrap();

    assert_eq!(args[separator + 1], "--exec=rm");
    assert_eq!(separator + 2, args.len());
}
