use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use lastic_core::{Effect, Msg, ProgressSample, Quality, TransferStatus};
use lastic_engine::{
    AudioFormat, DownloadRequest, EngineConfig, EngineEvent, EngineHandle, RawProgress,
};
use lastic_logging::{lastic_debug, lastic_info, lastic_warn};

use super::persistence::{save_settings, Settings};

pub struct EffectRunner {
    engine: EngineHandle,
    settings: Settings,
    settings_path: PathBuf,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        msg_tx: mpsc::Sender<Msg>,
        repaint: egui::Context,
        settings: Settings,
        settings_path: PathBuf,
    ) -> io::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(config, event_tx)?;
        spawn_event_loop(event_rx, msg_tx, repaint)?;
        Ok(Self {
            engine,
            settings,
            settings_path,
        })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchInfo { url } => {
                    lastic_info!("FetchInfo url_len={} url={}", url.len(), url);
                    self.engine.fetch_info(url);
                }
                Effect::StartDownload {
                    download_id,
                    url,
                    quality,
                } => {
                    lastic_info!("StartDownload id={} quality={}", download_id, quality);
                    self.engine
                        .download(download_id, download_request(url, quality));
                }
                Effect::CancelDownload { download_id } => {
                    self.engine.cancel(download_id);
                }
                Effect::PersistPreferredQuality(quality) => {
                    if self.settings.remember_quality(quality) {
                        save_settings(&self.settings_path, &self.settings);
                    }
                }
            }
        }
    }
}

fn spawn_event_loop(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
    repaint: egui::Context,
) -> io::Result<()> {
    thread::Builder::new()
        .name("lastic-events".to_string())
        .spawn(move || {
            while let Ok(event) = event_rx.recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
                repaint.request_repaint();
            }
            lastic_debug!("Engine event channel closed");
        })?;
    Ok(())
}

fn download_request(url: String, quality: Quality) -> DownloadRequest {
    DownloadRequest {
        url,
        format_selector: quality.format_selector(),
        audio: quality.audio_extraction().map(|audio| AudioFormat {
            codec: audio.codec.to_string(),
            bitrate_kbps: audio.bitrate_kbps,
        }),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::InfoFetched(info) => Msg::InfoFetched { title: info.title },
        EngineEvent::InfoFailed(err) => {
            lastic_warn!("Fetch failed: {}", err);
            Msg::InfoFailed {
                message: err.to_string(),
            }
        }
        EngineEvent::DownloadStarted { download_id, dir } => Msg::DownloadStarted {
            download_id,
            dir: dir.display().to_string(),
        },
        EngineEvent::Progress {
            download_id,
            progress,
        } => Msg::DownloadProgress {
            download_id,
            sample: map_progress(progress),
        },
        EngineEvent::DownloadCompleted {
            download_id,
            result,
        } => match result {
            Ok(outcome) => Msg::DownloadSucceeded {
                download_id,
                title: outcome.title,
            },
            Err(err) => {
                if !err.is_cancelled() {
                    lastic_warn!("Download {} failed: {}", download_id, err);
                }
                Msg::DownloadFailed {
                    download_id,
                    message: err.to_string(),
                }
            }
        },
    }
}

fn map_progress(progress: RawProgress) -> ProgressSample {
    ProgressSample {
        status: map_status(progress.status),
        downloaded_bytes: progress.downloaded_bytes,
        total_bytes: progress.total_bytes,
        percent_str: progress.percent_str,
        speed_str: progress.speed_str,
        eta_str: progress.eta_str,
    }
}

fn map_status(status: lastic_engine::TransferStatus) -> TransferStatus {
    match status {
        lastic_engine::TransferStatus::Downloading => TransferStatus::Downloading,
        lastic_engine::TransferStatus::Finished => TransferStatus::Finished,
        lastic_engine::TransferStatus::Other => TransferStatus::Other,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lastic_engine::{DownloadOutcome, EngineError, VideoInfo};

    use super::*;

    #[test]
    fn audio_only_requests_mp3_extraction() {
        let request = download_request("https://a.example/v".to_string(), Quality::AudioOnly);
        assert_eq!(request.format_selector, "bestaudio/best");
        assert_eq!(
            request.audio,
            Some(AudioFormat {
                codec: "mp3".to_string(),
                bitrate_kbps: 192,
            })
        );
    }

    #[test]
    fn capped_quality_has_no_audio_extraction() {
        let request = download_request("https://a.example/v".to_string(), Quality::P720);
        assert_eq!(
            request.format_selector,
            "bestvideo[height<=720]+bestaudio/best"
        );
        assert_eq!(request.audio, None);
    }

    #[test]
    fn progress_fields_carry_over() {
        let msg = map_event(EngineEvent::Progress {
            download_id: 3,
            progress: RawProgress {
                status: lastic_engine::TransferStatus::Finished,
                downloaded_bytes: Some(10),
                total_bytes: Some(20),
                percent_str: Some("50.0%".to_string()),
                speed_str: None,
                eta_str: Some("00:01".to_string()),
            },
        });
        assert_eq!(
            msg,
            Msg::DownloadProgress {
                download_id: 3,
                sample: ProgressSample {
                    status: TransferStatus::Finished,
                    downloaded_bytes: Some(10),
                    total_bytes: Some(20),
                    percent_str: Some("50.0%".to_string()),
                    speed_str: None,
                    eta_str: Some("00:01".to_string()),
                },
            }
        );
    }

    #[test]
    fn info_events_map_to_title_or_message() {
        let fetched = map_event(EngineEvent::InfoFetched(VideoInfo {
            title: "Clip".to_string(),
            id: None,
            extractor: None,
            uploader: None,
            duration_secs: None,
        }));
        assert_eq!(
            fetched,
            Msg::InfoFetched {
                title: "Clip".to_string()
            }
        );

        let failed = map_event(EngineEvent::InfoFailed(EngineError::Exit {
            code: Some(1),
            message: "Unsupported URL".to_string(),
        }));
        assert_eq!(
            failed,
            Msg::InfoFailed {
                message: "Unsupported URL".to_string()
            }
        );
    }

    #[test]
    fn completion_maps_to_success_or_failure() {
        let ok = map_event(EngineEvent::DownloadCompleted {
            download_id: 1,
            result: Ok(DownloadOutcome {
                title: "Clip".to_string(),
                dir: PathBuf::from("/tmp"),
            }),
        });
        assert_eq!(
            ok,
            Msg::DownloadSucceeded {
                download_id: 1,
                title: "Clip".to_string()
            }
        );

        let cancelled = map_event(EngineEvent::DownloadCompleted {
            download_id: 2,
            result: Err(EngineError::Cancelled),
        });
        assert!(matches!(
            cancelled,
            Msg::DownloadFailed { download_id: 2, .. }
        ));
    }

    #[test]
    fn started_event_carries_display_path() {
        let msg = map_event(EngineEvent::DownloadStarted {
            download_id: 4,
            dir: PathBuf::from("/data/videos"),
        });
        assert_eq!(
            msg,
            Msg::DownloadStarted {
                download_id: 4,
                dir: "/data/videos".to_string()
            }
        );
    }
}
