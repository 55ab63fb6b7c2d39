use serde::Deserialize;

use crate::command::{FIELD_SEPARATOR, PROGRESS_MARKER, TITLE_MARKER};
use crate::{RawProgress, TransferStatus, VideoInfo};

const UNKNOWN_TITLE: &str = "Unknown Title";

/// A line of tool output that carries structured information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Progress(RawProgress),
    Title(String),
}

#[derive(Debug, Deserialize)]
struct InfoDocument {
    title: Option<String>,
    id: Option<String>,
    extractor_key: Option<String>,
    extractor: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
}

pub fn parse_video_info(json: &str) -> Result<VideoInfo, serde_json::Error> {
    let doc: InfoDocument = serde_json::from_str(json.trim())?;
    Ok(VideoInfo {
        title: doc
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        id: doc.id,
        extractor: doc.extractor_key.or(doc.extractor),
        uploader: doc.uploader,
        duration_secs: doc.duration,
    })
}

pub fn parse_output_line(line: &str) -> Option<OutputLine> {
    let line = strip_ansi(line);
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(rest) = after_marker(line, TITLE_MARKER) {
        let title = rest.trim();
        return (!title.is_empty()).then(|| OutputLine::Title(title.to_string()));
    }

    let rest = after_marker(line, PROGRESS_MARKER)?;
    let fields: Vec<Option<&str>> = rest.split(FIELD_SEPARATOR).map(field_value).collect();
    let [status, downloaded, total, estimate, percent, speed, eta] = fields.as_slice() else {
        return None;
    };

    Some(OutputLine::Progress(RawProgress {
        status: match *status {
            Some("downloading") => TransferStatus::Downloading,
            Some("finished") => TransferStatus::Finished,
            _ => TransferStatus::Other,
        },
        downloaded_bytes: downloaded.and_then(parse_bytes),
        total_bytes: total.and_then(parse_bytes).or(estimate.and_then(parse_bytes)),
        percent_str: percent.map(str::to_string),
        speed_str: speed.map(str::to_string),
        eta_str: eta.map(str::to_string),
    }))
}

/// Human-readable failure from captured stderr: the last `ERROR:` line, else the last line.
pub fn error_message(stderr_lines: &[String]) -> Option<String> {
    let pick = stderr_lines
        .iter()
        .rev()
        .find_map(|line| line.trim().strip_prefix("ERROR:"))
        .or_else(|| {
            stderr_lines
                .iter()
                .rev()
                .map(|line| line.trim())
                .find(|line| !line.is_empty())
        })?;
    Some(pick.trim().to_string())
}

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let start = line.find(marker)? + marker.len();
    line[start..].strip_prefix(FIELD_SEPARATOR)
}

fn field_value(raw: &str) -> Option<&str> {
    let value = raw.trim();
    match value {
        "" | "NA" | "None" | "Unknown" => None,
        other => Some(other),
    }
}

// Byte counts may be printed as floats for estimates.
fn parse_bytes(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
