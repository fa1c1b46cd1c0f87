//! # Steganographer
//!
//! The workflow a presentation shell drives: hide a message in an image file
//! and later reveal it with the same secret.
//!
//! ## Hide
//! 1. Require image path, message and secret
//! 2. Load the image and embed the message
//! 3. Save to the configured output path
//! 4. Record the message length and secret in the session
//!
//! ## Reveal
//! 1. Authorize the secret (before the image is opened)
//! 2. Load the image and extract the recorded number of characters

use log::info;
use std::path::{Path, PathBuf};

use crate::config::StegoConfig;
use crate::error::{Result, StegoError};
use crate::imaging::{load_image, save_image};
use crate::processing::{embed, extract};
use crate::session::SessionGate;

pub struct Steganographer {
    config: StegoConfig,
    session: SessionGate,
}

impl Steganographer {
    pub fn new(config: StegoConfig) -> Self {
        Self {
            config,
            session: SessionGate::new(),
        }
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output.path
    }

    /// True once a message has been hidden in this session.
    pub fn has_recorded(&self) -> bool {
        self.session.is_set()
    }

    /// Hide `message` in the image at `image_path` and save the result.
    ///
    /// Surrounding whitespace is trimmed from `message`. The session is only
    /// updated once the output file is written.
    ///
    /// # Returns
    /// - `Ok(PathBuf)`: where the image was saved
    ///
    /// # Errors
    /// - [`StegoError::MissingField`]: an input is empty
    /// - [`StegoError::InvalidImage`], [`StegoError::InvalidCharacter`],
    ///   [`StegoError::CapacityExceeded`], [`StegoError::LossyFormat`],
    ///   [`StegoError::ImageSave`]
    pub fn hide<P: AsRef<Path>>(
        &mut self,
        image_path: P,
        message: &str,
        secret: &str,
    ) -> Result<PathBuf> {
        let image_path = image_path.as_ref();
        let message = message.trim();

        if image_path.as_os_str().is_empty() {
            return Err(StegoError::MissingField("image path"));
        }
        if message.is_empty() {
            return Err(StegoError::MissingField("message"));
        }
        if secret.is_empty() {
            return Err(StegoError::MissingField("password"));
        }

        let mut pixels = load_image(image_path)?;
        embed(&mut pixels, message)?;

        let output = self.config.output.path.clone();
        save_image(&pixels, &output)?;

        self.session.record(message, secret.as_bytes());
        info!(
            "Hid {} characters from {} into {}",
            message.chars().count(),
            image_path.display(),
            output.display()
        );
        Ok(output)
    }

    /// Recover the most recently hidden message from `image_path`.
    ///
    /// # Errors
    /// - [`StegoError::NotAuthorized`]: checked first, before the file is read
    /// - [`StegoError::InvalidImage`], [`StegoError::UnmappedSample`]
    pub fn reveal<P: AsRef<Path>>(&self, image_path: P, secret: &str) -> Result<String> {
        let length = self.session.authorize(secret.as_bytes())?;
        let pixels = load_image(image_path.as_ref())?;
        let message = extract(&pixels, length)?;
        info!(
            "Revealed {} of {} characters from {}",
            message.chars().count(),
            length,
            image_path.as_ref().display()
        );
        Ok(message)
    }
}
