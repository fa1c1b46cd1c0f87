//! # Diagonal Sample Codec
//!
//! Hides a message by writing each character's code point as a raw sample
//! value, one character per pixel position.
//!
//! ## Traversal
//!
//! The i-th character lands at `[i, i, i % 3]`: row and column advance
//! together down the main diagonal while the channel cycles Blue, Green, Red.
//! An image therefore holds `min(rows, cols)` characters.
//!
//! ## Bounds
//!
//! - [`embed`] is strict: a message longer than the diagonal fails with
//!   [`StegoError::CapacityExceeded`]. Positions written before the failure
//!   stay written; the caller must not treat the image as a result.
//! - [`extract`] is lenient: reading past the diagonal stops early and returns
//!   the characters recovered so far.
//!
//! No length header is stored in the image, so [`extract`] needs the length
//! from the caller.

use log::{debug, warn};

use super::charset::{encode_message, sample_to_char};
use super::pixels::PixelArray;
use crate::error::{Result, StegoError};

/// Number of channels the traversal cycles through.
const CHANNEL_CYCLE: usize = 3;

/// One visited sample position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub channel: usize,
}

/// The traversal order shared by [`embed`] and [`extract`].
#[derive(Debug, Clone)]
pub struct Traversal {
    rows: usize,
    cols: usize,
    step: usize,
}

impl Traversal {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, step: 0 }
    }

    pub fn for_image(image: &PixelArray) -> Self {
        Self::new(image.rows(), image.cols())
    }
}

impl Iterator for Traversal {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let i = self.step;
        if i >= self.rows || i >= self.cols {
            return None;
        }
        self.step += 1;
        Some(Position {
            row: i,
            col: i,
            channel: i % CHANNEL_CYCLE,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.min(self.cols).saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Traversal {}

/// Number of characters `image` can hold.
pub fn capacity(image: &PixelArray) -> usize {
    image.rows().min(image.cols())
}

/// Write `message` into `image` along the traversal.
///
/// # Errors
/// - [`StegoError::InvalidCharacter`]: a code point is 255 or above. Checked
///   before any sample is written.
/// - [`StegoError::CapacityExceeded`]: the message is longer than
///   [`capacity`]. The first `capacity` characters have already been written.
///
/// # Example
/// ```
/// use stego_gate::processing::{embed, PixelArray};
///
/// let mut image = PixelArray::zeros(4, 4, 3)?;
/// embed(&mut image, "hi")?;
/// assert_eq!(image.get(0, 0, 0), Some(104));
/// assert_eq!(image.get(1, 1, 1), Some(105));
/// # Ok::<(), stego_gate::StegoError>(())
/// ```
pub fn embed(image: &mut PixelArray, message: &str) -> Result<()> {
    let samples = encode_message(message)?;
    let capacity = capacity(image);

    for (pos, &value) in Traversal::for_image(image).zip(&samples) {
        image.set(pos.row, pos.col, pos.channel, value);
    }

    if samples.len() > capacity {
        warn!(
            "Message of {} characters exceeds image capacity of {}",
            samples.len(),
            capacity
        );
        return Err(StegoError::CapacityExceeded {
            needed: samples.len(),
            capacity,
        });
    }

    debug!("Embedded {} characters ({}x{} image)", samples.len(), image.rows(), image.cols());
    Ok(())
}

/// Read up to `length` characters from `image` along the traversal.
///
/// Returns fewer than `length` characters when the traversal runs out of
/// positions first.
///
/// # Errors
/// - [`StegoError::UnmappedSample`]: a visited sample equals 255.
pub fn extract(image: &PixelArray, length: usize) -> Result<String> {
    let mut message = String::with_capacity(length.min(capacity(image)));

    for (index, pos) in Traversal::for_image(image).take(length).enumerate() {
        let value = image
            .get(pos.row, pos.col, pos.channel)
            .ok_or_else(|| StegoError::InvalidImage(format!("position {:?} outside image", pos)))?;
        let c = sample_to_char(value).ok_or(StegoError::UnmappedSample { index, value })?;
        message.push(c);
    }

    let recovered = message.chars().count();
    if recovered < length {
        debug!("Extraction truncated: {} of {} characters", recovered, length);
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_traversal_order() {
        let positions: Vec<Position> = Traversal::new(5, 4).collect();
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[0], Position { row: 0, col: 0, channel: 0 });
        assert_eq!(positions[2], Position { row: 2, col: 2, channel: 2 });
        assert_eq!(positions[3], Position { row: 3, col: 3, channel: 0 });
        assert_eq!(Traversal::new(0, 10).count(), 0);
    }

    #[test]
    fn test_embed_hi_into_zeros() {
        let mut image = PixelArray::zeros(4, 4, 3).unwrap();
        embed(&mut image, "hi").unwrap();

        assert_eq!(image.get(0, 0, 0), Some(104));
        assert_eq!(image.get(1, 1, 1), Some(105));
        let touched = image.as_raw().iter().filter(|&&s| s != 0).count();
        assert_eq!(touched, 2);

        assert_eq!(extract(&image, 2).unwrap(), "hi");
    }

    #[test]
    fn test_capacity_boundary() {
        let base = PixelArray::filled(3, 5, 3, 7).unwrap();
        assert_eq!(capacity(&base), 3);

        let mut exact = base.clone();
        embed(&mut exact, "abc").unwrap();
        assert_eq!(extract(&exact, 3).unwrap(), "abc");

        let mut over = base.clone();
        let err = embed(&mut over, "abcd").unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded { needed: 4, capacity: 3 }
        ));
    }

    #[test]
    fn test_capacity_failure_leaves_partial_writes() {
        let mut image = PixelArray::zeros(2, 2, 3).unwrap();
        assert!(embed(&mut image, "xyz").is_err());
        assert_eq!(image.get(0, 0, 0), Some(b'x'));
        assert_eq!(image.get(1, 1, 1), Some(b'y'));
    }

    #[test]
    fn test_invalid_character_writes_nothing() {
        let mut image = PixelArray::zeros(4, 4, 3).unwrap();
        let err = embed(&mut image, "ok\u{ff}").unwrap_err();
        assert!(matches!(err, StegoError::InvalidCharacter { index: 2, .. }));
        assert!(image.as_raw().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_extract_truncates_past_diagonal() {
        let mut image = PixelArray::zeros(2, 8, 4).unwrap();
        embed(&mut image, "ab").unwrap();
        assert_eq!(extract(&image, 10).unwrap(), "ab");
        assert_eq!(extract(&image, 0).unwrap(), "");
    }

    #[test]
    fn test_extract_unmapped_sample() {
        let image = PixelArray::filled(3, 3, 3, 255).unwrap();
        let err = extract(&image, 1).unwrap_err();
        assert!(matches!(err, StegoError::UnmappedSample { index: 0, value: 255 }));
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let rows = rng.gen_range(1..40);
            let cols = rng.gen_range(1..40);
            let len = rng.gen_range(0..=rows.min(cols));
            let message: String = (0..len)
                .map(|_| char::from(rng.gen_range(0..=254u8)))
                .collect();

            let mut image = PixelArray::filled(rows, cols, 3, rng.gen()).unwrap();
            embed(&mut image, &message).unwrap();
            assert_eq!(extract(&image, len).unwrap(), message);
        }
    }
}
