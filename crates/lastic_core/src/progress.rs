use thiserror::Error;

const NOT_AVAILABLE: &str = "N/A";

/// Transfer phase reported by the extraction tool's progress hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferStatus {
    #[default]
    Downloading,
    /// The file finished transferring; post-processing may follow.
    Finished,
    Other,
}

/// One progress report relayed from a running download.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSample {
    pub status: TransferStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    /// Pre-formatted percentage such as `" 42.3%"`.
    pub percent_str: Option<String>,
    pub speed_str: Option<String>,
    pub eta_str: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("invalid percentage {0:?}")]
    InvalidPercent(String),
}

impl ProgressSample {
    /// Percentage in `0.0..=100.0`.
    ///
    /// Byte counts win when both are known and the total is non-zero; otherwise the
    /// formatted percentage string is parsed, defaulting to `0%`.
    pub fn percent(&self) -> Result<f32, ProgressError> {
        let raw = match (self.downloaded_bytes, self.total_bytes) {
            (Some(done), Some(total)) if total > 0 => (done as f64 / total as f64 * 100.0) as f32,
            _ => parse_percent(self.percent_str.as_deref().unwrap_or("0%"))?,
        };
        Ok(raw.clamp(0.0, 100.0))
    }

    pub fn speed_or_na(&self) -> &str {
        self.speed_str.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn eta_or_na(&self) -> &str {
        self.eta_str.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

fn parse_percent(text: &str) -> Result<f32, ProgressError> {
    let cleaned = text.trim().replace('%', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    match cleaned.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProgressError::InvalidPercent(text.to_string())),
    }
}
