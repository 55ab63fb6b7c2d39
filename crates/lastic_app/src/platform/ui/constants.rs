use egui::Color32;

pub const WINDOW_TITLE: &str = "Lastic Video Downloader";
pub const WINDOW_SIZE: [f32; 2] = [560.0, 480.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [420.0, 380.0];

pub const URL_HINT: &str = "Enter video URL here...";
pub const BUTTON_FETCH: &str = "Get Info";
pub const BUTTON_DOWNLOAD: &str = "Download";
pub const BUTTON_CANCEL: &str = "Cancel";

pub const HEADING_SIZE: f32 = 24.0;
pub const STATUS_SIZE: f32 = 16.0;
pub const LOG_SIZE: f32 = 12.0;
pub const PANEL_SPACING: f32 = 12.0;
pub const QUALITY_WIDTH: f32 = 140.0;
pub const PROGRESS_HEIGHT: f32 = 10.0;
pub const LOG_HEIGHT: f32 = 200.0;

pub const HEADING_COLOR: Color32 = Color32::from_rgb(51, 153, 255);
pub const STATUS_COLOR: Color32 = Color32::from_rgb(204, 204, 204);
pub const LOG_COLOR: Color32 = Color32::from_rgb(178, 178, 178);
pub const CANCEL_COLOR: Color32 = Color32::from_rgb(255, 51, 51);
