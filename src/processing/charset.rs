//! Character <-> sample mapping.
//!
//! Only code points `0..=254` can be hidden; 255 is outside the domain in both
//! directions.

use crate::error::{Result, StegoError};

/// Largest code point that maps to a sample value.
pub const MAX_CODE_POINT: u8 = 254;

/// Map a character to its sample value, if it has one.
pub fn char_to_sample(c: char) -> Option<u8> {
    u8::try_from(u32::from(c))
        .ok()
        .filter(|&b| b <= MAX_CODE_POINT)
}

/// Map a sample value back to its character, if it has one.
pub fn sample_to_char(value: u8) -> Option<char> {
    (value <= MAX_CODE_POINT).then(|| char::from(value))
}

/// Convert a whole message, failing on the first character out of range.
pub fn encode_message(message: &str) -> Result<Vec<u8>> {
    message
        .chars()
        .enumerate()
        .map(|(index, character)| {
            char_to_sample(character)
                .ok_or(StegoError::InvalidCharacter { index, character })
        })
        .collect()
}
