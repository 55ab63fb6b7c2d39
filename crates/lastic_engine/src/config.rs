use std::path::PathBuf;

/// Environment variable overriding the extraction tool executable.
pub const PROGRAM_ENV: &str = "LASTIC_YTDLP";

const DEFAULT_PROGRAM: &str = "yt-dlp";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// yt-dlp executable, looked up on `PATH` when relative.
    pub program: PathBuf,
    pub user_agent: String,
    pub download_dir: PathBuf,
    /// Output filename template, relative to `download_dir`.
    pub output_template: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_dir: default_download_dir(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

fn default_program() -> PathBuf {
    std::env::var_os(PROGRAM_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM))
}

/// Platform download directory: shared `Download` folder on Android, working directory elsewhere.
#[cfg(target_os = "android")]
pub fn default_download_dir() -> PathBuf {
    std::env::var_os("EXTERNAL_STORAGE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/storage/emulated/0"))
        .join("Download")
}

/// Platform download directory: shared `Download` folder on Android, working directory elsewhere.
#[cfg(not(target_os = "android"))]
pub fn default_download_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
