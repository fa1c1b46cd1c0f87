//! # Pixel Arrays
//!
//! [`PixelArray`] stores 8-bit samples indexed `[row, column, channel]`, with
//! channel 0 = Blue, 1 = Green, 2 = Red. Conversion to and from the `image`
//! crate swaps between that layout and the crate's RGB order.

use image::{DynamicImage, Rgb, RgbImage};

use crate::error::{Result, StegoError};

/// Fewest channels the codec can address (Blue, Green, Red).
pub const MIN_CHANNELS: usize = 3;

/// A dense `rows x cols x channels` array of unsigned 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    rows: usize,
    cols: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelArray {
    /// Create an array with every sample set to zero.
    pub fn zeros(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::filled(rows, cols, channels, 0)
    }

    /// Create an array with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, channels: usize, value: u8) -> Result<Self> {
        let len = sample_count(rows, cols, channels)?;
        Ok(Self {
            rows,
            cols,
            channels,
            samples: vec![value; len],
        })
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    /// - `channels` is below [`MIN_CHANNELS`]
    /// - `samples.len()` does not equal `rows * cols * channels`
    pub fn from_raw(rows: usize, cols: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let len = sample_count(rows, cols, channels)?;
        if samples.len() != len {
            return Err(StegoError::InvalidImage(format!(
                "expected {} samples for {}x{}x{}, got {}",
                len,
                rows,
                cols,
                channels,
                samples.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            samples,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(rows, cols, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.channels)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// Read the sample at `[row, col, channel]`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.offset(row, col, channel).map(|i| self.samples[i])
    }

    /// Write the sample at `[row, col, channel]`.
    ///
    /// Returns `false` and leaves the array untouched when out of range.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> bool {
        match self.offset(row, col, channel) {
            Some(i) => {
                self.samples[i] = value;
                true
            }
            None => false,
        }
    }

    fn offset(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols || channel >= self.channels {
            return None;
        }
        Some((row * self.cols + col) * self.channels + channel)
    }

    /// Convert a decoded image, dropping alpha and reordering to BGR.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut samples = Vec::with_capacity(rgb.as_raw().len());
        for pixel in rgb.pixels() {
            let Rgb([r, g, b]) = *pixel;
            samples.extend_from_slice(&[b, g, r]);
        }
        Self::from_raw(height as usize, width as usize, MIN_CHANNELS, samples)
    }

    /// Convert back to an RGB buffer; channels past the third are dropped.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let width = u32::try_from(self.cols)
            .map_err(|_| StegoError::ImageSave(format!("width {} too large", self.cols)))?;
        let height = u32::try_from(self.rows)
            .map_err(|_| StegoError::ImageSave(format!("height {} too large", self.rows)))?;

        let mut raw = Vec::with_capacity(self.rows * self.cols * 3);
        for pixel in self.samples.chunks_exact(self.channels) {
            raw.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        }

        RgbImage::from_raw(width, height, raw)
            .ok_or_else(|| StegoError::ImageSave("pixel buffer size mismatch".to_string()))
    }
}

fn sample_count(rows: usize, cols: usize, channels: usize) -> Result<usize> {
    if channels < MIN_CHANNELS {
        return Err(StegoError::InvalidImage(format!(
            "need at least {} channels, got {}",
            MIN_CHANNELS, channels
        )));
    }
    rows.checked_mul(cols)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| StegoError::InvalidImage("image dimensions overflow".to_string()))
}
