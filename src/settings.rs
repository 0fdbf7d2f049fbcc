// Persisted generation preferences
// Stored as JSON under the platform config directory; loading always
// succeeds by falling back to defaults field by field

use crate::generate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "melody-studio";
const SETTINGS_FILE: &str = "generation_settings.json";

/// Last-used generation preferences
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub provider: Provider,
    pub temperature: f32,
    /// Append generated notes instead of replacing the score
    pub overlay: bool,
    pub measures: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAI,
            temperature: 1.0,
            overlay: false,
            measures: 4,
        }
    }
}

/// On-disk shape; provider rides as a string so an unknown name degrades
/// to the default instead of failing the whole file
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default = "default_provider_name")]
    provider: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
    #[serde(default)]
    overlay: bool,
    #[serde(default = "default_measures")]
    measures: u32,
}

fn default_provider_name() -> String {
    Provider::OpenAI.as_str().to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_measures() -> u32 {
    4
}

impl GenerationSettings {
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Load the persisted settings, or defaults when the file is missing
    /// or unreadable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::debug!("no saved generation settings ({err}), using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str::<SettingsFile>(&json) {
            Ok(file) => Self::from_file(file),
            Err(err) => {
                log::debug!("invalid generation settings file ({err}), using defaults");
                Self::default()
            }
        }
    }

    fn from_file(file: SettingsFile) -> Self {
        let defaults = Self::default();
        Self {
            provider: Provider::from_str(&file.provider).unwrap_or(defaults.provider),
            temperature: file.temperature,
            overlay: file.overlay,
            measures: file.measures,
        }
    }

    /// Persist the settings, creating the config directory if needed
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory on this platform",
            ));
        };
        self.save_to(&path)
    }

    fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = SettingsFile {
            provider: self.provider.as_str().to_string(),
            temperature: self.temperature,
            overlay: self.overlay,
            measures: self.measures,
        };
        let json = serde_json::to_string_pretty(&file).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
