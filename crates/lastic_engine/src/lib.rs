//! Lastic engine: drives the external yt-dlp tool off the UI thread.
mod command;
mod config;
mod engine;
mod error;
mod parse;
mod persist;
mod types;
mod ytdlp;

pub use command::{download_args, info_args};
pub use config::{default_download_dir, EngineConfig, PROGRAM_ENV};
pub use engine::EngineHandle;
pub use error::EngineError;
pub use parse::{error_message, parse_output_line, parse_video_info, OutputLine};
pub use persist::{ensure_output_dir, write_atomically, PersistError};
pub use types::{
    AudioFormat, DownloadId, DownloadOutcome, DownloadRequest, EngineEvent, RawProgress,
    TransferStatus, VideoInfo,
};
pub use ytdlp::{ChannelProgressSink, Extractor, ProgressSink, YtDlpExtractor};
pub use tokio_util::sync::CancellationToken;
