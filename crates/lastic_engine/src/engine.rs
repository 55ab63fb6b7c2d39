use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use lastic_logging::{lastic_debug, lastic_warn};
use tokio_util::sync::CancellationToken;

use crate::ytdlp::{ChannelProgressSink, Extractor, ProgressSink, YtDlpExtractor};
use crate::{DownloadId, DownloadRequest, EngineConfig, EngineEvent};

enum EngineCommand {
    FetchInfo {
        url: String,
    },
    Download {
        download_id: DownloadId,
        request: DownloadRequest,
    },
    Cancel {
        download_id: DownloadId,
    },
}

type CancelRegistry = Arc<Mutex<HashMap<DownloadId, CancellationToken>>>;

/// Handle to the background worker that runs extractor calls off the UI thread.
///
/// Dropping the handle stops the worker; in-flight tool processes are killed.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, event_tx: mpsc::Sender<EngineEvent>) -> io::Result<Self> {
        Self::with_extractor(Arc::new(YtDlpExtractor::new(config)), event_tx)
    }

    pub fn with_extractor(
        extractor: Arc<dyn Extractor>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("lastic-engine")
            .enable_all()
            .build()?;
        let cancels: CancelRegistry = Arc::new(Mutex::new(HashMap::new()));

        thread::Builder::new()
            .name("lastic-engine-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    dispatch(&runtime, &extractor, &cancels, &event_tx, command);
                }
                lastic_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn fetch_info(&self, url: impl Into<String>) {
        self.send(EngineCommand::FetchInfo { url: url.into() });
    }

    pub fn download(&self, download_id: DownloadId, request: DownloadRequest) {
        self.send(EngineCommand::Download {
            download_id,
            request,
        });
    }

    pub fn cancel(&self, download_id: DownloadId) {
        self.send(EngineCommand::Cancel { download_id });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            lastic_warn!("Engine worker is gone; command dropped");
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    extractor: &Arc<dyn Extractor>,
    cancels: &CancelRegistry,
    event_tx: &mpsc::Sender<EngineEvent>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::FetchInfo { url } => {
            let extractor = Arc::clone(extractor);
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let event = match extractor.fetch_info(&url).await {
                    Ok(info) => EngineEvent::InfoFetched(info),
                    Err(err) => EngineEvent::InfoFailed(err),
                };
                let _ = event_tx.send(event);
            });
        }
        EngineCommand::Download {
            download_id,
            request,
        } => {
            let token = CancellationToken::new();
            if let Ok(mut registry) = cancels.lock() {
                registry.insert(download_id, token.clone());
            }
            let extractor = Arc::clone(extractor);
            let cancels = Arc::clone(cancels);
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let sink = ChannelProgressSink::new(event_tx.clone());
                let result = extractor
                    .download(download_id, &request, &sink, &token)
                    .await;
                if let Ok(mut registry) = cancels.lock() {
                    registry.remove(&download_id);
                }
                sink.emit(EngineEvent::DownloadCompleted {
                    download_id,
                    result,
                });
            });
        }
        EngineCommand::Cancel { download_id } => {
            let token = cancels
                .lock()
                .ok()
                .and_then(|mut registry| registry.remove(&download_id));
            match token {
                Some(token) => token.cancel(),
                None => lastic_debug!("Cancel for finished download {}", download_id),
            }
        }
    }
}
