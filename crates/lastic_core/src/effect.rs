use crate::{DownloadId, Quality};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchInfo {
        url: String,
    },
    StartDownload {
        download_id: DownloadId,
        url: String,
        quality: Quality,
    },
    CancelDownload {
        download_id: DownloadId,
    },
    /// Remember the quality for the next run.
    PersistPreferredQuality(Quality),
}
