//! # Error Types
//!
//! This module defines all error types for the voicing engine.
//!
//! Note that "no voicing found" is never an error: searches that find nothing
//! return empty results. Errors are reserved for malformed input (note names,
//! keys, intervals, ranges), configuration files and the progression store.
//!
//! ## Usage
//! ```rust
//! use chordvoice::{Key, VoicingError};
//!
//! match Key::parse("H") {
//!     Ok(key) => println!("Key: {}", key),
//!     Err(VoicingError::InvalidKey(name)) => eprintln!("Unknown key {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoicingError {
    /// A note or pitch name could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordvoice::VoicingError;
    /// let err = VoicingError::InvalidNote("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: H4");
    /// ```
    #[error("Invalid note name: {0}")]
    InvalidNote(String),

    /// A key name is not a recognized tonic.
    ///
    /// # Example
    /// ```
    /// # use chordvoice::VoicingError;
    /// let err = VoicingError::InvalidKey("X#".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: X#");
    /// ```
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// An interval in a voicing template is malformed.
    ///
    /// # Example
    /// ```
    /// # use chordvoice::VoicingError;
    /// let err = VoicingError::InvalidInterval("3P".to_string());
    /// assert_eq!(err.to_string(), "Invalid interval: 3P");
    /// ```
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// A pitch range is malformed or its bounds are reversed.
    #[error("Invalid pitch range: {0}")]
    InvalidRange(String),

    /// Invalid YAML configuration or custom dictionary.
    ///
    /// # Example
    /// ```
    /// # use chordvoice::VoicingError;
    /// let err = VoicingError::ConfigError("unknown dictionary: jazz".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: unknown dictionary: jazz");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The custom progression store rejected an operation or could not be decoded.
    #[error("Progression store error: {0}")]
    StoreError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
