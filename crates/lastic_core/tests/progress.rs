use lastic_core::{ProgressError, ProgressSample, TransferStatus};

fn sample() -> ProgressSample {
    ProgressSample {
        status: TransferStatus::Downloading,
        ..ProgressSample::default()
    }
}

#[test]
fn byte_counts_take_precedence_over_percent_string() {
    let progress = ProgressSample {
        downloaded_bytes: Some(250),
        total_bytes: Some(1000),
        percent_str: Some("99.0%".to_string()),
        ..sample()
    };
    assert_eq!(progress.percent(), Ok(25.0));
}

#[test]
fn falls_back_to_formatted_percent() {
    let progress = ProgressSample {
        downloaded_bytes: Some(250),
        percent_str: Some("  42.5%".to_string()),
        ..sample()
    };
    assert_eq!(progress.percent(), Ok(42.5));
}

#[test]
fn zero_total_falls_back_to_formatted_percent() {
    let progress = ProgressSample {
        downloaded_bytes: Some(10),
        total_bytes: Some(0),
        percent_str: Some("7%".to_string()),
        ..sample()
    };
    assert_eq!(progress.percent(), Ok(7.0));
}

#[test]
fn missing_everything_defaults_to_zero() {
    assert_eq!(sample().percent(), Ok(0.0));
}

#[test]
fn percent_stays_within_bounds() {
    let overshoot = ProgressSample {
        downloaded_bytes: Some(1500),
        total_bytes: Some(1000),
        ..sample()
    };
    assert_eq!(overshoot.percent(), Ok(100.0));

    let negative = ProgressSample {
        percent_str: Some("-3%".to_string()),
        ..sample()
    };
    assert_eq!(negative.percent(), Ok(0.0));

    let huge = ProgressSample {
        percent_str: Some("250.0%".to_string()),
        ..sample()
    };
    assert_eq!(huge.percent(), Ok(100.0));
}

#[test]
fn garbage_percent_is_an_error() {
    let progress = ProgressSample {
        percent_str: Some("Unknown".to_string()),
        ..sample()
    };
    assert_eq!(
        progress.percent(),
        Err(ProgressError::InvalidPercent("Unknown".to_string()))
    );
}

#[test]
fn speed_and_eta_default_to_not_available() {
    let progress = sample();
    assert_eq!(progress.speed_or_na(), "N/A");
    assert_eq!(progress.eta_or_na(), "N/A");

    let known = ProgressSample {
        speed_str: Some("1.2MiB/s".to_string()),
        eta_str: Some("00:12".to_string()),
        ..sample()
    };
    assert_eq!(known.speed_or_na(), "1.2MiB/s");
    assert_eq!(known.eta_or_na(), "00:12");
}
