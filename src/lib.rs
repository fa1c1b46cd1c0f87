//! # stego-gate
//!
//! Hides a short text message in the pixel samples of an image and reveals it
//! again for a caller holding the same in-memory secret.
//!
//! The secret only gates extraction; the hidden bytes are not encrypted.
//!
//! ## Modules
//!
//! - [`processing`]: pixel arrays and the embed/extract codec
//! - [`session`]: the gate that authorizes extraction
//! - [`imaging`]: loading and lossless saving of image files
//! - [`steganographer`]: hide/reveal workflow over files
//! - [`config`]: TOML configuration
//! - [`logging`]: logger setup

pub mod config;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod processing;
pub mod session;
pub mod steganographer;

pub use error::{Result, StegoError};
pub use processing::{embed, extract, PixelArray};
pub use session::{SessionGate, SharedSessionGate};
pub use steganographer::Steganographer;
