//! Runtime configuration
//!
//! Every field has a default, so a partial JSON file is fine. Difficulty is
//! the only setting a deployment normally changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::error::Result;
use crate::net::SettlePollConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible play; drawn from entropy when unset
    pub seed: Option<u64>,
    /// Multiplier on the profile's thinking time (0 plays instantly)
    pub thinking_time_scale: f32,
    pub settle_poll: SettlePollConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            seed: None,
            thinking_time_scale: 1.0,
            settle_poll: SettlePollConfig::default(),
        }
    }
}

impl Settings {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Parse settings, rejecting malformed JSON and unknown difficulties
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file, falling back to defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"difficulty": "medium-hard", "seed": 99}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::MediumHard);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.thinking_time_scale, 1.0);
        assert_eq!(settings.settle_poll, SettlePollConfig::default());
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(matches!(Settings::from_json(r#"{"difficulty": "godlike"}"#), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/eightball-ai/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("eightball-ai-settings-{}.json", std::process::id()));
        let mut settings = Settings::with_difficulty(Difficulty::Expert);
        settings.seed = Some(7);
        settings.thinking_time_scale = 0.5;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
