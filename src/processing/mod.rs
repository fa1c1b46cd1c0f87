//! # Image Processing
//!
//! The codec that hides a message in raw pixel samples and reads it back.
//!
//! - [`pixels`]: the `[row, column, channel]` sample array
//! - [`charset`]: character <-> sample mapping
//! - [`codec`]: traversal order, embedding and extraction

pub mod charset;
pub mod codec;
pub mod pixels;

// Re-export main functions for convenience
pub use codec::{capacity, embed, extract, Position, Traversal};
pub use pixels::PixelArray;
