use chrono::NaiveTime;

use crate::log_buffer::LogBuffer;
use crate::view_model::AppViewModel;
use crate::Quality;

pub type DownloadId = u64;

pub(crate) const QUALITY_PLACEHOLDER: &str = "Select Quality";
pub(crate) const QUALITY_LOADING: &str = "Loading...";
pub(crate) const STATUS_READY: &str = "Ready";

/// Background operation currently owned by the UI. At most one runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Fetching,
    Downloading {
        download_id: DownloadId,
    },
    /// Transfer finished; the tool is merging or converting.
    Processing {
        download_id: DownloadId,
    },
}

impl Activity {
    pub fn download_id(self) -> Option<DownloadId> {
        match self {
            Activity::Downloading { download_id } | Activity::Processing { download_id } => {
                Some(download_id)
            }
            Activity::Idle | Activity::Fetching => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == Activity::Idle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    url_input: String,
    title: String,
    qualities: Vec<Quality>,
    selected_quality: Option<Quality>,
    preferred_quality: Option<Quality>,
    quality_text: String,
    status: String,
    progress: f32,
    activity: Activity,
    cancel_requested: bool,
    cancelled_download: Option<DownloadId>,
    next_download_id: DownloadId,
    log: LogBuffer,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            title: String::new(),
            qualities: Vec::new(),
            selected_quality: None,
            preferred_quality: None,
            quality_text: QUALITY_PLACEHOLDER.to_string(),
            status: STATUS_READY.to_string(),
            progress: 0.0,
            activity: Activity::Idle,
            cancel_requested: false,
            cancelled_download: None,
            next_download_id: 1,
            log: LogBuffer::default(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let idle = self.activity.is_idle();
        AppViewModel {
            url: self.url_input.clone(),
            title: self.title.clone(),
            status: self.status.clone(),
            quality_text: self.quality_text.clone(),
            qualities: self.qualities.clone(),
            selected_quality: self.selected_quality,
            progress: self.progress,
            fetch_enabled: idle,
            download_enabled: idle && self.selected_quality.is_some(),
            cancel_visible: self.activity.download_id().is_some(),
            log_lines: self.log.lines().map(ToOwned::to_owned).collect(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn url(&self) -> &str {
        &self.url_input
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn selected_quality(&self) -> Option<Quality> {
        self.selected_quality
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    /// True when events tagged with `download_id` may still change the UI.
    pub fn is_active_download(&self, download_id: DownloadId) -> bool {
        !self.cancel_requested && self.activity.download_id() == Some(download_id)
    }

    pub(crate) fn trimmed_url(&self) -> Option<String> {
        let trimmed = self.url_input.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub(crate) fn set_url(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn log_line(&mut self, now: NaiveTime, message: &str) {
        self.log.push(now, message);
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.dirty = true;
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.activity = Activity::Fetching;
        self.quality_text = QUALITY_LOADING.to_string();
        self.dirty = true;
    }

    pub(crate) fn apply_info(&mut self, title: String) {
        let selected = self.preferred_quality.unwrap_or(Quality::Best);
        self.title = title;
        self.qualities = Quality::ALL.to_vec();
        self.select_quality(selected);
        self.activity = Activity::Idle;
    }

    pub(crate) fn end_fetch_with_error(&mut self) {
        self.activity = Activity::Idle;
        self.quality_text = self
            .selected_quality
            .map(|quality| quality.label().to_string())
            .unwrap_or_else(|| QUALITY_PLACEHOLDER.to_string());
        self.dirty = true;
    }

    pub(crate) fn offers_quality(&self, quality: Quality) -> bool {
        self.qualities.contains(&quality)
    }

    pub(crate) fn select_quality(&mut self, quality: Quality) {
        self.selected_quality = Some(quality);
        self.quality_text = quality.label().to_string();
        self.dirty = true;
    }

    pub(crate) fn set_preferred_quality(&mut self, quality: Quality) {
        self.preferred_quality = Some(quality);
    }

    pub(crate) fn begin_download(&mut self) -> DownloadId {
        let download_id = self.next_download_id;
        self.next_download_id += 1;
        self.cancel_requested = false;
        self.cancelled_download = None;
        self.progress = 0.0;
        self.activity = Activity::Downloading { download_id };
        self.dirty = true;
        download_id
    }

    pub(crate) fn cancel_download(&mut self) -> Option<DownloadId> {
        let download_id = self.activity.download_id()?;
        self.cancel_requested = true;
        self.cancelled_download = Some(download_id);
        self.activity = Activity::Idle;
        self.dirty = true;
        Some(download_id)
    }

    pub(crate) fn was_cancelled(&self, download_id: DownloadId) -> bool {
        self.cancelled_download == Some(download_id)
    }

    pub(crate) fn set_progress(&mut self, percent: f32) {
        self.progress = percent.clamp(0.0, 100.0);
        self.dirty = true;
    }

    pub(crate) fn enter_processing(&mut self, download_id: DownloadId) {
        self.activity = Activity::Processing { download_id };
        self.dirty = true;
    }

    pub(crate) fn finish_download(&mut self) {
        self.activity = Activity::Idle;
        self.dirty = true;
    }
}
