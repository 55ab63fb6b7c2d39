use std::fmt;

/// Quality presets offered once video info has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Best,
    P1080,
    P720,
    P480,
    P360,
    AudioOnly,
}

/// Audio post-processing requested from the extraction tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioExtraction {
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

const MP3_192: AudioExtraction = AudioExtraction {
    codec: "mp3",
    bitrate_kbps: 192,
};

impl Quality {
    /// Display order of the quality selector.
    pub const ALL: [Quality; 6] = [
        Quality::Best,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
        Quality::AudioOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quality::Best => "Best",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::AudioOnly => "Audio Only",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|quality| quality.label() == label.trim())
    }

    pub fn max_height(self) -> Option<u32> {
        match self {
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
            Quality::Best | Quality::AudioOnly => None,
        }
    }

    /// yt-dlp `-f` expression for this preset.
    pub fn format_selector(self) -> String {
        match (self, self.max_height()) {
            (Quality::AudioOnly, _) => "bestaudio/best".to_string(),
            (_, Some(height)) => format!("bestvideo[height<={height}]+bestaudio/best"),
            (_, None) => "bestvideo+bestaudio/best".to_string(),
        }
    }

    pub fn audio_extraction(self) -> Option<AudioExtraction> {
        match self {
            Quality::AudioOnly => Some(MP3_192),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
