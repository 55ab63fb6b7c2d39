use std::collections::VecDeque;

use chrono::NaiveTime;
use lastic_logging::{lastic_info, ACTIVITY_TARGET};

/// Scrollback kept for the activity log; older lines are dropped.
pub const MAX_LOG_LINES: usize = 500;

pub(crate) const INITIAL_LOG_LINE: &str = "Ready to download videos...";

/// Timestamped activity lines shown in the scrolling log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBuffer {
    lines: VecDeque<String>,
}

impl Default for LogBuffer {
    fn default() -> Self {
        let mut lines = VecDeque::with_capacity(16);
        lines.push_back(INITIAL_LOG_LINE.to_string());
        Self { lines }
    }
}

impl LogBuffer {
    pub fn push(&mut self, now: NaiveTime, message: &str) {
        lastic_info!(target: ACTIVITY_TARGET, "{}", message);
        if self.lines.len() == MAX_LOG_LINES {
            self.lines.pop_front();
        }
        self.lines
            .push_back(format!("[{}] {}", now.format("%H:%M:%S"), message));
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}
