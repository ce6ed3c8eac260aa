//! # Configuration
//!
//! Engine settings loaded from YAML. Every field is optional:
//!
//! ```yaml
//! key: Eb
//! search-range: C3..C5
//! display-range: C3..B5
//! dictionary: all            # all | triads | lefthand
//! dictionary-file: jazz.yaml # overrides `dictionary`, relative to the config file
//! ```
//!
//! The YAML is first read into [`RawConfig`] (plain strings), then validated
//! into [`Config`], so a bad note name is reported with the field it came from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dictionary::VoicingDictionary;
use crate::error::VoicingError;
use crate::keyboard::Keyboard;
use crate::pitch::PitchRange;
use crate::roman::Key;

/// Validated engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub key: Key,
    pub search_range: PitchRange,
    pub display_range: PitchRange,
    pub dictionary: VoicingDictionary,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            key: Key::default(),
            search_range: PitchRange::default(),
            display_range: Keyboard::default().range,
            dictionary: VoicingDictionary::all(),
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub key: Option<String>,
    pub search_range: Option<String>,
    pub display_range: Option<String>,
    pub dictionary: Option<String>,
    pub dictionary_file: Option<PathBuf>,
}

impl Config {
    /// Parse YAML content. A `dictionary-file` is resolved against the working directory.
    pub fn from_yaml(content: &str) -> Result<Self, VoicingError> {
        Self::from_yaml_in(content, Path::new("."))
    }

    /// Load a YAML config file. A `dictionary-file` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, VoicingError> {
        let content = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        log::debug!("loading config from {}", path.display());
        Self::from_yaml_in(&content, base)
    }

    fn from_yaml_in(content: &str, base: &Path) -> Result<Self, VoicingError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| VoicingError::ConfigError(e.to_string()))?
        };
        let defaults = Config::default();

        let key = match &raw.key {
            Some(k) => Key::parse(k)?,
            None => defaults.key,
        };

        let search_range = match &raw.search_range {
            Some(r) => parse_range("search-range", r)?,
            None => defaults.search_range,
        };

        let display_range = match &raw.display_range {
            Some(r) => parse_range("display-range", r)?,
            None => defaults.display_range,
        };

        let dictionary = if let Some(file) = &raw.dictionary_file {
            let content = fs::read_to_string(base.join(file))?;
            VoicingDictionary::from_yaml(&content)?
        } else if let Some(name) = &raw.dictionary {
            VoicingDictionary::named(name)
                .ok_or_else(|| VoicingError::ConfigError(format!("unknown dictionary: {}", name)))?
        } else {
            defaults.dictionary
        };

        Ok(Config {
            key,
            search_range,
            display_range,
            dictionary,
        })
    }
}

fn parse_range(field: &str, value: &str) -> Result<PitchRange, VoicingError> {
    value
        .parse()
        .map_err(|e| VoicingError::ConfigError(format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.search_range.to_string(), "C3..C5");
        assert_eq!(config.display_range.to_string(), "C3..B5");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_yaml(
            "key: Eb\nsearch-range: G2..G4\ndisplay-range: C2..B4\ndictionary: triads\n",
        )
        .unwrap();
        assert_eq!(config.key.to_string(), "Eb");
        assert_eq!(config.search_range.to_string(), "G2..G4");
        assert_eq!(config.display_range.to_string(), "C2..B4");
        assert_eq!(config.dictionary, VoicingDictionary::triads());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(Config::from_yaml("key: H\n"), Err(VoicingError::InvalidKey(_))));
        assert!(matches!(
            Config::from_yaml("search-range: C5..C3\n"),
            Err(VoicingError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_yaml("dictionary: jazz\n"),
            Err(VoicingError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_yaml("tempo: 120\n"),
            Err(VoicingError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_yaml("display-range: C3..C999999999\n"),
            Err(VoicingError::ConfigError(_))
        ));
    }

    #[test]
    fn test_dictionary_file_with_unordered_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.yaml"), "M: [\"1P 8P 1P\"]\n").unwrap();
        let config_path = dir.path().join("chordvoice.yaml");
        fs::write(&config_path, "dictionary-file: broken.yaml\n").unwrap();

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
    }

    #[test]
    fn test_dictionary_file_is_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shells.yaml"), "7: [\"1P 3M 7m\"]\n").unwrap();
        let config_path = dir.path().join("chordvoice.yaml");
        fs::write(&config_path, "dictionary-file: shells.yaml\n").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.dictionary.len(), 1);
        assert!(config.dictionary.lookup("7").is_some());
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load(Path::new("/nonexistent/chordvoice.yaml"));
        assert!(matches!(result, Err(VoicingError::Io(_))));
    }
}
