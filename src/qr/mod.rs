//! QR code encoding and decoding
//!
//! Encoding rasterizes a [`QrRequest`] into an RGB image using a [`QrStyle`];
//! decoding reads the text back out of an image and is used to verify output.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;

use crate::error::{Error, Result};
use image::Rgb;
use qrcode::EcLevel;

/// Text to encode into a QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    text: String,
}

impl QrRequest {
    /// Create a request for the given text. Empty text is allowed.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The text to encode
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw bytes handed to the encoder
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl From<&str> for QrRequest {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Rendering parameters shared by every image a generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Smallest symbol version to try (1..=40)
    pub min_version: i16,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level
    pub ec_level: EcLevel,
    /// Dark module color
    pub foreground: Rgb<u8>,
    /// Light module and quiet zone color
    pub background: Rgb<u8>,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            min_version: 1,
            box_size: 10,
            border: 5,
            ec_level: EcLevel::M,
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

impl QrStyle {
    /// Pixel width of a rendered symbol with `modules` modules per side
    pub fn image_side(&self, modules: u32) -> u32 {
        (modules + 2 * self.border) * self.box_size
    }
}

/// Parse `black`, `white` or a `#RRGGBB` hex color.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "black" => return Ok(Rgb([0, 0, 0])),
        "white" => return Ok(Rgb([255, 255, 255])),
        _ => {}
    }

    let hex = trimmed
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| Error::Config(format!("Invalid color '{value}', expected #RRGGBB")))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|e| Error::Config(format!("Invalid color '{value}': {e}")))
    };

    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Parse an error correction level letter.
pub fn parse_ec_level(value: &str) -> Result<EcLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(Error::Config(format!(
            "Unknown error correction level '{other}', expected L, M, Q or H"
        ))),
    }
}
