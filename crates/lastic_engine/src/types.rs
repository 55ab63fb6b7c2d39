use std::path::PathBuf;

use crate::EngineError;

pub type DownloadId = u64;

/// Transfer phase of a progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Downloading,
    Finished,
    Other,
}

/// Progress fields as printed by the tool's progress template. `NA` fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProgress {
    pub status: TransferStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    pub percent_str: Option<String>,
    pub speed_str: Option<String>,
    pub eta_str: Option<String>,
}

/// Metadata resolved for a URL without downloading it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub title: String,
    pub id: Option<String>,
    pub extractor: Option<String>,
    pub uploader: Option<String>,
    pub duration_secs: Option<f64>,
}

/// Everything the tool needs to download one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub format_selector: String,
    pub audio: Option<AudioFormat>,
}

/// Extract audio to `codec` at `bitrate_kbps` after download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat {
    pub codec: String,
    pub bitrate_kbps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub title: String,
    pub dir: PathBuf,
}

#[derive(Debug)]
pub enum EngineEvent {
    InfoFetched(VideoInfo),
    InfoFailed(EngineError),
    DownloadStarted {
        download_id: DownloadId,
        dir: PathBuf,
    },
    Progress {
        download_id: DownloadId,
        progress: RawProgress,
    },
    DownloadCompleted {
        download_id: DownloadId,
        result: Result<DownloadOutcome, EngineError>,
    },
}
