use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{program:?} not found; install yt-dlp or set LASTIC_YTDLP")]
    ToolNotFound { program: PathBuf },
    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Non-zero exit; `message` is the last error line the tool printed.
    #[error("{message}")]
    Exit { code: Option<i32>, message: String },
    #[error("unreadable metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error(transparent)]
    OutputDir(#[from] crate::PersistError),
    #[error("cancelled")]
    Cancelled,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    pub(crate) fn spawn(program: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            EngineError::ToolNotFound { program }
        } else {
            EngineError::Spawn { program, source }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }
}
