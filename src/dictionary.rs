//! # Voicing Dictionary
//!
//! A read-only catalog of interval templates per chord quality.
//!
//! Each template is an ascending list of intervals measured from the chord's
//! tonic. The first interval picks the bottom note, so templates describe both
//! the inversion and the spacing of a voicing:
//!
//! ```text
//! M:  1P 3M 5P     root position triad
//!     3M 5P 8P     first inversion
//!     5P 8P 10M    second inversion
//! 7:  3M 6M 7m 9M  rootless left-hand voicing (3-13-7-9)
//! ```
//!
//! ## Catalogs
//! - [`VoicingDictionary::triads`] - close-position triads in all inversions
//! - [`VoicingDictionary::lefthand`] - rootless jazz left-hand voicings
//! - [`VoicingDictionary::all`] - both, triads first
//!
//! Custom catalogs can be loaded from YAML with [`VoicingDictionary::from_yaml`]:
//!
//! ```rust
//! use chordvoice::VoicingDictionary;
//!
//! let dictionary = VoicingDictionary::from_yaml(r#"
//! M: ["1P 3M 5P", "3M 5P 8P"]
//! sus4: ["1P 4P 5P"]
//! "#)?;
//! assert_eq!(dictionary.lookup("maj").map(|t| t.len()), Some(2));
//! # Ok::<(), chordvoice::VoicingError>(())
//! ```

use std::collections::HashMap;

use crate::chord::quality_candidates;
use crate::error::VoicingError;
use crate::pitch::Interval;

/// An ordered list of intervals above the tonic
pub type Template = Vec<Interval>;

const TRIADS: &[(&str, &[&str])] = &[
    ("M", &["1P 3M 5P", "3M 5P 8P", "5P 8P 10M"]),
    ("m", &["1P 3m 5P", "3m 5P 8P", "5P 8P 10m"]),
    ("o", &["1P 3m 5d", "3m 5d 8P", "5d 8P 10m"]),
    ("aug", &["1P 3M 5A", "3M 5A 8P", "5A 8P 10M"]),
];

const LEFTHAND: &[(&str, &[&str])] = &[
    ("m7", &["3m 5P 7m 9M", "7m 9M 10m 12P"]),
    ("7", &["3M 6M 7m 9M", "7m 9M 10M 13M"]),
    ("^7", &["3M 5P 7M 9M", "7M 9M 10M 12P"]),
    ("69", &["3M 5P 6M 9M"]),
    ("m7b5", &["3m 5d 7m 8P", "7m 8P 10m 12d"]),
    ("7b9", &["3M 6m 7m 9m", "7m 9m 10M 13m"]),
    ("7b13", &["3M 6m 7m 9m", "7m 9m 10M 13m"]),
    ("o7", &["1P 3m 5d 6M", "5d 6M 8P 10m"]),
    ("7#11", &["7m 9M 11A 13M"]),
    ("7#9", &["3M 7m 9A"]),
    ("mM7", &["3m 5P 7M 9M", "7M 9M 10m 12P"]),
    ("m6", &["3m 5P 6M 9M", "6M 9M 10m 12P"]),
];

/// Chord-quality identifiers mapped to their templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoicingDictionary {
    /// Quality identifiers in insertion order
    order: Vec<String>,
    entries: HashMap<String, Vec<Template>>,
}

impl VoicingDictionary {
    /// Close-position triads
    pub fn triads() -> Self {
        Self::from_table(TRIADS)
    }

    /// Rootless left-hand seventh-chord voicings
    pub fn lefthand() -> Self {
        Self::from_table(LEFTHAND)
    }

    /// Triads and left-hand voicings together
    pub fn all() -> Self {
        let mut dictionary = Self::triads();
        for (quality, templates) in Self::lefthand().into_entries() {
            dictionary.insert(quality, templates);
        }
        dictionary
    }

    /// Look up a built-in catalog by name (`all`, `triads`, `lefthand`)
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::all()),
            "triads" => Some(Self::triads()),
            "lefthand" => Some(Self::lefthand()),
            _ => None,
        }
    }

    /// Parse a YAML mapping of quality → list of space-separated interval templates
    pub fn from_yaml(content: &str) -> Result<Self, VoicingError> {
        // serde_yaml::Mapping keeps document order
        let raw: serde_yaml::Mapping =
            serde_yaml::from_str(content).map_err(|e| VoicingError::ConfigError(e.to_string()))?;

        let mut dictionary = VoicingDictionary::default();
        for (key, value) in raw {
            // unquoted `7:` or `69:` arrive as numbers
            let quality = match key {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                other => {
                    return Err(VoicingError::ConfigError(format!(
                        "quality must be a string: {:?}",
                        other
                    )))
                }
            };
            let templates: Vec<String> = serde_yaml::from_value(value)
                .map_err(|e| VoicingError::ConfigError(format!("{}: {}", quality, e)))?;
            let parsed = templates
                .iter()
                .map(|t| parse_template(t))
                .collect::<Result<Vec<_>, _>>()?;
            dictionary.insert(quality, parsed);
        }
        Ok(dictionary)
    }

    fn from_table(table: &[(&str, &[&str])]) -> Self {
        let mut dictionary = VoicingDictionary::default();
        for (quality, templates) in table {
            let parsed = templates
                .iter()
                .map(|t| {
                    parse_template(t)
                        .unwrap_or_else(|e| panic!("built-in {} template: {}", quality, e))
                })
                .collect();
            dictionary.insert(quality.to_string(), parsed);
        }
        dictionary
    }

    fn insert(&mut self, quality: String, templates: Vec<Template>) {
        if !self.entries.contains_key(&quality) {
            self.order.push(quality.clone());
        }
        self.entries.insert(quality, templates);
    }

    fn into_entries(mut self) -> Vec<(String, Vec<Template>)> {
        self.order
            .into_iter()
            .filter_map(|q| self.entries.remove(&q).map(|t| (q, t)))
            .collect()
    }

    /// Templates for a chord quality.
    ///
    /// Tries the quality as written first, then every dictionary identifier the
    /// quality is an alias of. Returns `None` when nothing matches.
    pub fn lookup(&self, quality: &str) -> Option<&[Template]> {
        if let Some(templates) = self.entries.get(quality) {
            return Some(templates);
        }
        quality_candidates(quality)
            .find_map(|id| self.entries.get(id))
            .map(|templates| templates.as_slice())
    }

    /// Quality identifiers in catalog order
    pub fn qualities(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|q| q.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn parse_template(template: &str) -> Result<Template, VoicingError> {
    let intervals = template
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Template, _>>()?;
    if intervals.is_empty() {
        return Err(VoicingError::InvalidInterval(template.to_string()));
    }
    // voicings are read low to high with no repeated pitch
    if intervals.windows(2).any(|pair| pair[0].semitones >= pair[1].semitones) {
        return Err(VoicingError::InvalidInterval(format!(
            "{} (intervals must ascend)",
            template
        )));
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_parse() {
        for (quality, templates) in TRIADS.iter().chain(LEFTHAND) {
            for template in *templates {
                assert!(parse_template(template).is_ok(), "{}: {}", quality, template);
            }
        }
    }

    #[test]
    fn test_all_contains_both_catalogs() {
        let all = VoicingDictionary::all();
        assert_eq!(all.len(), TRIADS.len() + LEFTHAND.len());
        assert_eq!(all.qualities().next(), Some("M"));
        assert!(all.lookup("m7").is_some());
        assert!(VoicingDictionary::triads().lookup("m7").is_none());
    }

    #[test]
    fn test_lookup_through_aliases() {
        let all = VoicingDictionary::all();
        assert_eq!(all.lookup("maj").map(|t| t.len()), Some(3));
        assert_eq!(all.lookup("").map(|t| t.len()), Some(3));
        assert_eq!(all.lookup("Maj7").map(|t| t.len()), Some(2));
        assert_eq!(all.lookup("dim7").map(|t| t.len()), Some(2));
        assert!(all.lookup("mm7").is_none());
        assert!(all.lookup("majm7").is_none());
    }

    #[test]
    fn test_template_intervals_ascend() {
        let all = VoicingDictionary::all();
        for quality in all.qualities() {
            for template in all.lookup(quality).unwrap() {
                for pair in template.windows(2) {
                    assert!(pair[0].semitones < pair[1].semitones, "{}", quality);
                }
            }
        }
    }

    #[test]
    fn test_from_yaml_keeps_order() {
        let dictionary = VoicingDictionary::from_yaml("sus4: [\"1P 4P 5P\"]\nM: [\"1P 3M 5P\"]\n").unwrap();
        assert_eq!(dictionary.qualities().collect::<Vec<_>>(), vec!["sus4", "M"]);
    }

    #[test]
    fn test_from_yaml_numeric_qualities() {
        let dictionary = VoicingDictionary::from_yaml("7: [\"1P 3M 7m\"]\n69: [\"3M 5P 6M 9M\"]\n").unwrap();
        assert!(dictionary.lookup("7").is_some());
        assert!(dictionary.lookup("6/9").is_some());
    }

    #[test]
    fn test_from_yaml_rejects_bad_interval() {
        let result = VoicingDictionary::from_yaml("M: [\"1P 3X 5P\"]\n");
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
        let result = VoicingDictionary::from_yaml("- not a map\n");
        assert!(matches!(result, Err(VoicingError::ConfigError(_))));
    }

    #[test]
    fn test_from_yaml_rejects_unordered_templates() {
        let result = VoicingDictionary::from_yaml("M: [\"1P 8P 1P\"]\n");
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
        let result = VoicingDictionary::from_yaml("M: [\"5P 3M\"]\n");
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
        let result = VoicingDictionary::from_yaml("M: [\"1P 1P 5P\"]\n");
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
    }

    #[test]
    fn test_rejected_template_fails_whole_catalog() {
        let result = VoicingDictionary::from_yaml("M: [\"1P 3M 5P\", \"5P 3M\"]\nm: [\"1P 3m 5P\"]\n");
        assert!(matches!(result, Err(VoicingError::InvalidInterval(_))));
    }
}
