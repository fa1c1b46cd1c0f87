//! # Session Gate
//!
//! Holds the length and secret of the most recent successful embed, and only
//! runs extraction for a caller presenting the same secret.
//!
//! ## States
//!
//! - **Unset**: nothing recorded yet. Every secret is refused, including the
//!   empty one.
//! - **Set**: a `(length, secret)` pair is stored. A matching secret unlocks
//!   extraction with the stored length; any other secret is refused without
//!   touching the codec.
//!
//! [`SessionGate::record`] moves Unset to Set and overwrites an earlier record.
//! There is no way back to Unset.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::error::{Result, StegoError};
use crate::processing::{extract, PixelArray};

/// The pair stored after a successful embed. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionRecord {
    message_len: usize,
    secret: Vec<u8>,
}

/// In-memory gate guarding extraction.
#[derive(Debug, Default)]
pub struct SessionGate {
    record: Option<SessionRecord>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a message has been recorded.
    pub fn is_set(&self) -> bool {
        self.record.is_some()
    }

    /// Remember `message`'s length and `secret`. Call only after `embed`
    /// succeeded for `message`.
    pub fn record(&mut self, message: &str, secret: &[u8]) {
        let message_len = message.chars().count();
        self.record = Some(SessionRecord {
            message_len,
            secret: secret.to_vec(),
        });
        info!("Session recorded a {}-character message", message_len);
    }

    /// Check `supplied` against the stored secret and return the stored
    /// message length on a match.
    ///
    /// # Errors
    /// - [`StegoError::NotAuthorized`]: nothing recorded, or the secret differs
    pub fn authorize(&self, supplied: &[u8]) -> Result<usize> {
        match &self.record {
            Some(record) if record.secret == supplied => Ok(record.message_len),
            Some(_) => {
                warn!("Rejected reveal attempt: secret mismatch");
                Err(StegoError::NotAuthorized)
            }
            None => {
                warn!("Rejected reveal attempt: no message recorded in this session");
                Err(StegoError::NotAuthorized)
            }
        }
    }

    /// Recover the recorded message from `image` if `supplied` matches.
    ///
    /// The codec is not invoked when authorization fails.
    pub fn reveal(&self, image: &PixelArray, supplied: &[u8]) -> Result<String> {
        let length = self.authorize(supplied)?;
        extract(image, length)
    }
}

/// A [`SessionGate`] that can be shared between threads.
///
/// `record` and `reveal` are serialized on one mutex, so a reader never sees
/// a length from one record paired with the secret of another.
#[derive(Debug, Default)]
pub struct SharedSessionGate {
    inner: Mutex<SessionGate>,
}

impl SharedSessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, message: &str, secret: &[u8]) {
        self.lock().record(message, secret);
    }

    pub fn authorize(&self, supplied: &[u8]) -> Result<usize> {
        self.lock().authorize(supplied)
    }

    pub fn reveal(&self, image: &PixelArray, supplied: &[u8]) -> Result<String> {
        self.lock().reveal(image, supplied)
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_set()
    }

    // The record is replaced in a single assignment, so a poisoned lock still
    // guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, SessionGate> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
