//! # Error Types
//!
//! Every fallible library operation returns [`StegoError`]. The variants keep
//! authorization failures apart from image and I/O failures so a wrong secret
//! is never reported as a broken image.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Error, Debug)]
pub enum StegoError {
    /// The image could not be decoded into a pixel array.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The message does not fit the positions along the traversal.
    #[error("Message too long for image capacity: need {needed} positions, have {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// A message character has a code point of 255 or above.
    #[error("Character {character:?} at position {index} cannot be hidden (code point must be below 255)")]
    InvalidCharacter { index: usize, character: char },

    /// A sample read during extraction has no character mapping.
    #[error("Sample value {value} at position {index} does not map to a character")]
    UnmappedSample { index: usize, value: u8 },

    /// Wrong secret, or nothing has been hidden in this session yet.
    #[error("YOU ARE NOT AUTHORIZED")]
    NotAuthorized,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The output path names a format that would alter sample values.
    #[error("Refusing lossy output format: {0}")]
    LossyFormat(String),

    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StegoError {
    /// True for the authorization failure, which shells present differently.
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, StegoError::NotAuthorized)
    }
}
