//! Clipboard bridge
//!
//! The window talks to the clipboard only through [`ClipboardBridge`], so the
//! platform backend can be swapped without touching UI code:
//!
//! - [`Win32Clipboard`] writes raw `CF_UNICODETEXT` / `CF_DIB` data (Windows)
//! - [`ArboardClipboard`] goes through `arboard` on every other platform
//! - [`MemoryClipboard`] keeps the data in-process when no system clipboard
//!   can be opened

mod memory;
mod portable;
#[cfg(windows)]
mod win32;

pub use memory::MemoryClipboard;
pub use portable::ArboardClipboard;
#[cfg(windows)]
pub use win32::Win32Clipboard;

use crate::error::Result;
use image::codecs::bmp::BmpEncoder;
use image::{ExtendedColorType, RgbImage};
use std::path::Path;

/// Size of the `BITMAPFILEHEADER` that precedes the DIB in a `.bmp` file
pub const BITMAP_FILE_HEADER_LEN: usize = 14;

/// Capability interface over the host clipboard
pub trait ClipboardBridge {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Replace the clipboard contents with Unicode text
    fn put_text(&mut self, text: &str) -> Result<()>;

    /// Read Unicode text from the clipboard
    fn get_text(&mut self) -> Result<String>;

    /// Replace the clipboard contents with a device-independent bitmap
    fn put_image_bitmap(&mut self, bitmap: &BitmapPayload) -> Result<()>;
}

/// Data handed to a clipboard backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// Unicode text
    Text(String),
    /// Device-independent bitmap
    Bitmap(BitmapPayload),
}

/// An RGB image serialized as a DIB: a BMP file without its 14-byte file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapPayload {
    image: RgbImage,
    dib: Vec<u8>,
}

impl BitmapPayload {
    /// Load an image file and convert it into a DIB payload
    pub fn from_png(path: &Path) -> Result<Self> {
        let image = image::open(path)?.to_rgb8();
        Self::from_rgb(image)
    }

    /// Serialize an RGB image into a DIB payload
    pub fn from_rgb(image: RgbImage) -> Result<Self> {
        let bmp = encode_bmp(&image)?;
        let dib = bmp[BITMAP_FILE_HEADER_LEN..].to_vec();
        Ok(Self { image, dib })
    }

    /// The DIB bytes placed on the clipboard
    pub fn dib(&self) -> &[u8] {
        &self.dib
    }

    /// Length of the DIB bytes
    pub fn len(&self) -> usize {
        self.dib.len()
    }

    /// Whether the DIB is empty
    pub fn is_empty(&self) -> bool {
        self.dib.is_empty()
    }

    /// The source pixels, for backends that take raw image data
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// Serialize an RGB image as a complete `.bmp` file in memory
pub fn encode_bmp(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bmp = Vec::new();
    BmpEncoder::new(&mut bmp).encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bmp)
}

/// Open the best clipboard backend available on this host.
#[cfg(windows)]
pub fn system_clipboard() -> Box<dyn ClipboardBridge> {
    Box::new(Win32Clipboard::new())
}

/// Open the best clipboard backend available on this host.
///
/// Falls back to an in-process clipboard when the system one cannot be
/// opened (for example on a headless session).
#[cfg(not(windows))]
pub fn system_clipboard() -> Box<dyn ClipboardBridge> {
    match ArboardClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("System clipboard unavailable, using in-process clipboard: {e}");
            Box::new(MemoryClipboard::default())
        }
    }
}
