//! Lastic core: pure state machine and view-model helpers.
mod effect;
mod log_buffer;
mod msg;
mod progress;
mod quality;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use log_buffer::{LogBuffer, MAX_LOG_LINES};
pub use msg::Msg;
pub use progress::{ProgressError, ProgressSample, TransferStatus};
pub use quality::{AudioExtraction, Quality};
pub use state::{Activity, AppState, DownloadId};
pub use update::update;
pub use view_model::AppViewModel;
