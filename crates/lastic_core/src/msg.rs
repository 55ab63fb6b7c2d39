#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User clicked Get Info.
    FetchClicked,
    /// Engine resolved metadata for the URL.
    InfoFetched { title: String },
    /// Engine failed to resolve metadata.
    InfoFailed { message: String },
    /// User picked an entry from the quality selector.
    QualitySelected(crate::Quality),
    /// Restore the quality chosen in a previous run.
    RestorePreferredQuality(crate::Quality),
    /// User clicked Download.
    DownloadClicked,
    /// User clicked Cancel.
    CancelClicked,
    /// Engine resolved the download directory and started the tool.
    DownloadStarted {
        download_id: crate::DownloadId,
        dir: String,
    },
    /// Engine progress for a download.
    DownloadProgress {
        download_id: crate::DownloadId,
        sample: crate::ProgressSample,
    },
    DownloadSucceeded {
        download_id: crate::DownloadId,
        title: String,
    },
    DownloadFailed {
        download_id: crate::DownloadId,
        message: String,
    },
    /// UI/render tick.
    Tick,
    NoOp,
}
