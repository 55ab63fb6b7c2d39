use crate::Quality;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub title: String,
    pub status: String,
    /// Text on the quality selector button.
    pub quality_text: String,
    pub qualities: Vec<Quality>,
    pub selected_quality: Option<Quality>,
    /// Percentage in `0.0..=100.0`.
    pub progress: f32,
    pub fetch_enabled: bool,
    pub download_enabled: bool,
    pub cancel_visible: bool,
    pub log_lines: Vec<String>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Progress as a `0.0..=1.0` fraction for progress-bar widgets.
    pub fn progress_fraction(&self) -> f32 {
        (self.progress / 100.0).clamp(0.0, 1.0)
    }
}
