use std::fs;
use std::path::{Path, PathBuf};

use lastic_core::Quality;
use lastic_engine::{write_atomically, EngineConfig};
use lastic_logging::{lastic_error, lastic_info, lastic_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "lastic_settings.ron";

/// User settings kept between runs. Missing fields fall back to engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub download_dir: Option<PathBuf>,
    pub ytdlp_program: Option<PathBuf>,
    /// Label of the last quality used for a download.
    pub last_quality: Option<String>,
}

impl Settings {
    pub(crate) fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(dir) = &self.download_dir {
            config = config.with_download_dir(dir.clone());
        }
        if let Some(program) = &self.ytdlp_program {
            config = config.with_program(program.clone());
        }
        config
    }

    pub(crate) fn preferred_quality(&self) -> Option<Quality> {
        self.last_quality.as_deref().and_then(Quality::from_label)
    }

    /// Returns true when the stored quality changed.
    pub(crate) fn remember_quality(&mut self, quality: Quality) -> bool {
        let label = quality.label();
        if self.last_quality.as_deref() == Some(label) {
            return false;
        }
        self.last_quality = Some(label.to_string());
        true
    }
}

pub(crate) fn default_settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILENAME)
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            lastic_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            lastic_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            lastic_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub(crate) fn save_settings(path: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            lastic_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(path, &content) {
        lastic_error!("Failed to write settings to {:?}: {}", path, err);
    }
}
