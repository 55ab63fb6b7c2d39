use chrono::NaiveTime;
use lastic_logging::{lastic_debug, lastic_warn};

use crate::{Activity, AppState, DownloadId, Effect, Msg, ProgressSample, TransferStatus};

const STATUS_FETCHING: &str = "Fetching video info...";
const STATUS_READY_TO_DOWNLOAD: &str = "READY TO DOWNLOAD";
const STATUS_PROCESSING: &str = "Processing...";
const STATUS_COMPLETE: &str = "✔️ DOWNLOAD COMPLETE";
const STATUS_ERROR: &str = "Error";

/// Pure update function: applies a message to state and returns any effects.
///
/// `now` stamps any log lines written while handling the message.
pub fn update(mut state: AppState, msg: Msg, now: NaiveTime) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(text) => {
            state.set_url(text);
            Vec::new()
        }
        Msg::FetchClicked => {
            if !state.activity().is_idle() {
                return (state, Vec::new());
            }
            let Some(url) = state.trimmed_url() else {
                state.log_line(now, "Please enter a URL first.");
                return (state, Vec::new());
            };
            state.set_status(STATUS_FETCHING);
            state.begin_fetch();
            vec![Effect::FetchInfo { url }]
        }
        Msg::InfoFetched { title } => {
            if state.activity() == Activity::Fetching {
                state.log_line(now, &format!("Loaded: {title}"));
                state.apply_info(title);
                state.set_status(STATUS_READY_TO_DOWNLOAD);
            }
            Vec::new()
        }
        Msg::InfoFailed { message } => {
            if state.activity() == Activity::Fetching {
                state.end_fetch_with_error();
                state.set_status(STATUS_ERROR);
                state.log_line(now, &format!("Error: Fetch failed: {message}"));
            }
            Vec::new()
        }
        Msg::QualitySelected(quality) => {
            if state.activity().is_idle() && state.offers_quality(quality) {
                state.select_quality(quality);
            }
            Vec::new()
        }
        Msg::RestorePreferredQuality(quality) => {
            state.set_preferred_quality(quality);
            Vec::new()
        }
        Msg::DownloadClicked => start_download(&mut state, now),
        Msg::CancelClicked => match state.cancel_download() {
            Some(download_id) => {
                state.log_line(now, "Cancelling download...");
                vec![Effect::CancelDownload { download_id }]
            }
            None => Vec::new(),
        },
        Msg::DownloadStarted { download_id, dir } => {
            if state.is_active_download(download_id) {
                state.log_line(now, &format!("Saving to: {dir}"));
            }
            Vec::new()
        }
        Msg::DownloadProgress {
            download_id,
            sample,
        } => {
            if state.is_active_download(download_id) {
                apply_progress(&mut state, download_id, &sample, now);
            } else {
                lastic_debug!("Dropping progress for inactive download {}", download_id);
            }
            Vec::new()
        }
        Msg::DownloadSucceeded { download_id, title } => {
            if accepts_completion(&state, download_id) {
                state.finish_download();
                state.set_progress(100.0);
                state.set_status(STATUS_COMPLETE);
                state.log_line(now, &format!("Successfully downloaded: {title}"));
            }
            Vec::new()
        }
        Msg::DownloadFailed {
            download_id,
            message,
        } => {
            if accepts_completion(&state, download_id) {
                state.finish_download();
                state.set_status(STATUS_ERROR);
                state.log_line(now, &format!("Error: {message}"));
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_download(state: &mut AppState, now: NaiveTime) -> Vec<Effect> {
    if !state.activity().is_idle() {
        return Vec::new();
    }
    let Some(url) = state.trimmed_url() else {
        state.log_line(now, "Error: Please enter a URL");
        return Vec::new();
    };
    let Some(quality) = state.selected_quality() else {
        state.log_line(now, "Error: Please fetch video info first");
        return Vec::new();
    };

    let download_id = state.begin_download();
    state.set_preferred_quality(quality);
    state.log_line(now, &format!("Starting download: {quality}"));
    vec![
        Effect::PersistPreferredQuality(quality),
        Effect::StartDownload {
            download_id,
            url,
            quality,
        },
    ]
}

fn apply_progress(
    state: &mut AppState,
    download_id: DownloadId,
    sample: &ProgressSample,
    now: NaiveTime,
) {
    match sample.status {
        TransferStatus::Downloading => match sample.percent() {
            Ok(percent) => {
                state.set_progress(percent);
                state.set_status(format!("Downloading: {percent:.1}%"));
                state.log_line(
                    now,
                    &format!(
                        "Progress: {percent:.1}% | Speed: {} | ETA: {}",
                        sample.speed_or_na(),
                        sample.eta_or_na()
                    ),
                );
            }
            Err(err) => lastic_warn!("Progress error: {}", err),
        },
        TransferStatus::Finished => {
            state.enter_processing(download_id);
            state.set_status(STATUS_PROCESSING);
        }
        TransferStatus::Other => {}
    }
}

fn accepts_completion(state: &AppState, download_id: DownloadId) -> bool {
    if state.is_active_download(download_id) {
        return true;
    }
    if state.was_cancelled(download_id) {
        lastic_debug!("Suppressing completion of cancelled download {}", download_id);
    }
    false
}
