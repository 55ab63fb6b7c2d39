use std::collections::VecDeque;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::mpsc;

use lastic_logging::{lastic_debug, lastic_info, lastic_warn, TOOL_TARGET};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::command::{download_args, info_args};
use crate::parse::{error_message, parse_output_line, parse_video_info, OutputLine};
use crate::persist::ensure_output_dir;
use crate::{
    DownloadId, DownloadOutcome, DownloadRequest, EngineConfig, EngineError, EngineEvent,
    VideoInfo,
};

const STDERR_TAIL_LINES: usize = 20;
const FALLBACK_TITLE: &str = "Video";

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Seam over the external extraction tool.
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, EngineError>;

    /// Downloads `request`, emitting `DownloadStarted` and `Progress` events on `sink`.
    /// Returns `EngineError::Cancelled` once `cancel` fires; the tool process is killed.
    async fn download(
        &self,
        download_id: DownloadId,
        request: &DownloadRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome, EngineError>;
}

#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    config: EngineConfig,
}

impl YtDlpExtractor {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self, args: Vec<String>) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(args)
            .env("PYTHONIOENCODING", "UTF-8")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn(&self, args: Vec<String>) -> Result<Child, EngineError> {
        self.command(args)
            .spawn()
            .map_err(|err| EngineError::spawn(self.config.program.clone(), err))
    }
}

#[async_trait::async_trait]
impl Extractor for YtDlpExtractor {
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, EngineError> {
        lastic_info!("Fetching info for {}", url);
        let output = self
            .command(info_args(&self.config, url))
            .output()
            .await
            .map_err(|err| EngineError::spawn(self.config.program.clone(), err))?;

        if !output.status.success() {
            let stderr: Vec<String> = String::from_utf8_lossy(&output.stderr)
                .lines()
                .map(ToOwned::to_owned)
                .collect();
            return Err(exit_error(output.status, &stderr));
        }
        Ok(parse_video_info(&String::from_utf8_lossy(&output.stdout))?)
    }

    async fn download(
        &self,
        download_id: DownloadId,
        request: &DownloadRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome, EngineError> {
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        let dir = ensure_output_dir(&self.config.download_dir)?;
        sink.emit(EngineEvent::DownloadStarted {
            download_id,
            dir: dir.clone(),
        });
        lastic_info!(
            "Download {} selector={} dir={:?}",
            download_id,
            request.format_selector,
            dir
        );

        let mut child = self.spawn(download_args(&self.config, &dir, request))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("tool stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("tool stderr not captured"))?;
        // Split on raw bytes: tool output is not guaranteed to be UTF-8.
        let mut out_lines = BufReader::new(stdout).split(b'\n');
        let mut err_lines = BufReader::new(stderr).split(b'\n');

        let mut title: Option<String> = None;
        let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
        let (mut out_open, mut err_open) = (true, true);

        while out_open || err_open {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(kill(&mut child, download_id).await);
                }
                segment = out_lines.next_segment(), if out_open => match segment? {
                    Some(bytes) => handle_line(download_id, &decode(&bytes), sink, &mut title),
                    None => out_open = false,
                },
                segment = err_lines.next_segment(), if err_open => match segment? {
                    Some(bytes) => {
                        let line = decode(&bytes);
                        handle_line(download_id, &line, sink, &mut title);
                        if stderr_tail.len() == STDERR_TAIL_LINES {
                            stderr_tail.pop_front();
                        }
                        stderr_tail.push_back(line);
                    }
                    None => err_open = false,
                },
            }
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => None,
            status = child.wait() => Some(status?),
        };
        let Some(status) = status else {
            return Err(kill(&mut child, download_id).await);
        };

        if !status.success() {
            let tail: Vec<String> = stderr_tail.into_iter().collect();
            return Err(exit_error(status, &tail));
        }

        Ok(DownloadOutcome {
            title: title.unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            dir,
        })
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn handle_line(
    download_id: DownloadId,
    line: &str,
    sink: &dyn ProgressSink,
    title: &mut Option<String>,
) {
    match parse_output_line(line) {
        Some(OutputLine::Progress(progress)) => sink.emit(EngineEvent::Progress {
            download_id,
            progress,
        }),
        Some(OutputLine::Title(found)) => *title = Some(found),
        None if line.trim().is_empty() => {}
        None => lastic_debug!(target: TOOL_TARGET, "{}", line),
    }
}

async fn kill(child: &mut Child, download_id: DownloadId) -> EngineError {
    if let Err(err) = child.kill().await {
        lastic_warn!("Failed to stop download {}: {}", download_id, err);
    }
    lastic_info!("Download {} cancelled", download_id);
    EngineError::Cancelled
}

fn exit_error(status: ExitStatus, stderr: &[String]) -> EngineError {
    EngineError::Exit {
        code: status.code(),
        message: error_message(stderr).unwrap_or_else(|| format!("yt-dlp exited with {status}")),
    }
}
