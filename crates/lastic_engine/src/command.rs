use std::path::Path;

use crate::{DownloadRequest, EngineConfig};

pub(crate) const PROGRESS_MARKER: &str = "LASTIC_PROGRESS";
pub(crate) const TITLE_MARKER: &str = "LASTIC_TITLE";
pub(crate) const FIELD_SEPARATOR: char = '|';

/// Arguments for a metadata-only run that prints one JSON document.
pub fn info_args(config: &EngineConfig, url: &str) -> Vec<String> {
    let mut args = vec![
        "--dump-single-json".to_string(),
        "--skip-download".to_string(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
    ];
    push_common(&mut args, config);
    push_url(&mut args, url);
    args
}

/// Arguments for a download into `dir` that reports progress and the final title.
pub fn download_args(config: &EngineConfig, dir: &Path, request: &DownloadRequest) -> Vec<String> {
    let mut args = vec![
        "--newline".to_string(),
        "--quiet".to_string(),
        "--progress".to_string(),
        "--no-simulate".to_string(),
        "--progress-template".to_string(),
        progress_template(),
        "--print".to_string(),
        format!("after_move:{TITLE_MARKER}{FIELD_SEPARATOR}%(title)s"),
        "-P".to_string(),
        format!("home:{}", dir.display()),
        "-o".to_string(),
        config.output_template.clone(),
        "-f".to_string(),
        request.format_selector.clone(),
    ];
    if let Some(audio) = &request.audio {
        args.extend([
            "-x".to_string(),
            "--audio-format".to_string(),
            audio.codec.clone(),
            "--audio-quality".to_string(),
            format!("{}K", audio.bitrate_kbps),
        ]);
    }
    push_common(&mut args, config);
    push_url(&mut args, &request.url);
    args
}

fn progress_template() -> String {
    const FIELDS: [&str; 7] = [
        "status",
        "downloaded_bytes",
        "total_bytes",
        "total_bytes_estimate",
        "_percent_str",
        "_speed_str",
        "_eta_str",
    ];
    let mut template = format!("download:{PROGRESS_MARKER}");
    for field in FIELDS {
        template.push(FIELD_SEPARATOR);
        template.push_str(&format!("%(progress.{field})s"));
    }
    template
}

fn push_common(args: &mut Vec<String>, config: &EngineConfig) {
    args.push("--user-agent".to_string());
    args.push(config.user_agent.clone());
}

// `--` keeps a URL starting with '-' from being parsed as an option.
fn push_url(args: &mut Vec<String>, url: &str) {
    args.push("--".to_string());
    args.push(url.to_string());
}
