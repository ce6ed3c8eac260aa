//! # Progression Library
//!
//! Built-in preset progressions plus a JSON file of user-defined ones.
//!
//! Custom progressions are entered as dash-separated degree symbols
//! (`"I-V-vi-IV"`) and stored as records:
//!
//! ```json
//! [{ "name": "Pop", "chords": ["I", "V", "vi", "IV"] }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VoicingError;

/// Degree symbols offered by the progression builder
pub const CHORD_PALETTE: [&str; 18] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "i", "ii", "iii", "iv", "v", "vi", "vii", "bII",
    "bIII", "bVI", "bVII",
];

/// A named progression of degree symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub name: String,
    pub chords: Vec<String>,
}

impl ProgressionRecord {
    pub fn new(name: impl Into<String>, chords: &[&str]) -> Self {
        ProgressionRecord {
            name: name.into(),
            chords: chords.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The presets every session starts with
pub fn default_progressions() -> Vec<ProgressionRecord> {
    vec![
        ProgressionRecord::new("I-V-vi-IV", &["I", "V", "vi", "IV"]),
        ProgressionRecord::new("ii-V-I", &["ii", "V", "I"]),
        ProgressionRecord::new("Canon", &["I", "V", "vi", "iii", "IV", "I", "IV", "V"]),
    ]
}

/// Split `"I - V - vi - IV"` into degree symbols, dropping empty entries
pub fn parse_progression_text(text: &str) -> Vec<String> {
    text.split('-')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Presets followed by custom progressions
pub fn all_progressions(custom: &[ProgressionRecord]) -> Vec<ProgressionRecord> {
    let mut all = default_progressions();
    all.extend_from_slice(custom);
    all
}

/// Custom progressions persisted as a JSON array
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    path: PathBuf,
    records: Vec<ProgressionRecord>,
}

impl ProgressionStore {
    /// Open a store. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, VoicingError> {
        let path = path.into();
        let records = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| VoicingError::StoreError(format!("{}: {}", path.display(), e)))?
        } else {
            Vec::new()
        };
        log::debug!("loaded {} custom progressions from {}", records.len(), path.display());
        Ok(ProgressionStore { path, records })
    }

    pub fn records(&self) -> &[ProgressionRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a progression from its name and dash-separated chord text
    pub fn add(&mut self, name: &str, chords: &str) -> Result<&ProgressionRecord, VoicingError> {
        let name = name.trim();
        let chords = parse_progression_text(chords);
        if name.is_empty() {
            return Err(VoicingError::StoreError("progression name is empty".to_string()));
        }
        if chords.is_empty() {
            return Err(VoicingError::StoreError(format!("progression '{}' has no chords", name)));
        }
        self.records.push(ProgressionRecord {
            name: name.to_string(),
            chords,
        });
        Ok(&self.records[self.records.len() - 1])
    }

    /// Remove the progression at `index`
    pub fn remove(&mut self, index: usize) -> Result<ProgressionRecord, VoicingError> {
        if index >= self.records.len() {
            return Err(VoicingError::StoreError(format!(
                "no custom progression at index {} ({} stored)",
                index,
                self.records.len()
            )));
        }
        Ok(self.records.remove(index))
    }

    /// Write all records back to the store file
    pub fn save(&self) -> Result<(), VoicingError> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| VoicingError::StoreError(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}
