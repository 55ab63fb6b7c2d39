use chrono::NaiveTime;
use lastic_core::{LogBuffer, MAX_LOG_LINES};

#[test]
fn lines_are_timestamped() {
    let mut log = LogBuffer::default();
    log.push(NaiveTime::from_hms_opt(7, 5, 3).unwrap(), "Loaded: Clip");

    assert_eq!(
        log.text(),
        "Ready to download videos...\n[07:05:03] Loaded: Clip"
    );
}

#[test]
fn scrollback_is_bounded() {
    let mut log = LogBuffer::default();
    let now = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    for i in 0..MAX_LOG_LINES + 25 {
        log.push(now, &format!("line {i}"));
    }

    assert_eq!(log.len(), MAX_LOG_LINES);
    assert_eq!(log.lines().next(), Some("[00:00:00] line 25"));
    assert_eq!(
        log.last(),
        Some(format!("[00:00:00] line {}", MAX_LOG_LINES + 24).as_str())
    );
}
