// Extraction settings
// Pitch band and segmentation parameters, loadable from a JSON file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Parameters steering melody extraction and segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractSettings {
    /// Lowest pitch considered melodic; anything below is discarded
    pub min_pitch: f64,

    /// Highest pitch considered melodic; anything above is discarded.
    /// The rest sentinel (200) always lies above this band.
    pub max_pitch: f64,

    /// Longest rest (in beats) allowed inside one melody segment;
    /// longer gaps split the melody
    pub max_rest: f64,

    /// Shortest melody segment (in beats) worth keeping as training data
    pub min_melody_length: f64,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        ExtractSettings {
            min_pitch: 49.0,
            max_pitch: 84.0,
            max_rest: 4.0,
            min_melody_length: 16.0,
        }
    }
}

impl ExtractSettings {
    /// Load settings from a JSON file and validate them.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: ExtractSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check that the settings describe a usable configuration.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_pitch >= self.max_pitch {
            return Err(SettingsError::Invalid(format!(
                "pitch band is empty: min_pitch {} >= max_pitch {}",
                self.min_pitch, self.max_pitch
            )));
        }
        if self.max_rest <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "max_rest must be positive, got {}",
                self.max_rest
            )));
        }
        if self.min_melody_length <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "min_melody_length must be positive, got {}",
                self.min_melody_length
            )));
        }
        Ok(())
    }
}
