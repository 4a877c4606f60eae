//! Cross-platform clipboard backed by `arboard`

use super::{BitmapPayload, ClipboardBridge};
use crate::error::Result;
use arboard::{Clipboard, ImageData};
use image::DynamicImage;
use std::borrow::Cow;

/// System clipboard through `arboard`.
///
/// `arboard` takes RGBA pixels rather than a raw DIB, so images are handed
/// over from the payload's source pixels.
pub struct ArboardClipboard {
    inner: Clipboard,
}

impl ArboardClipboard {
    /// Open the system clipboard
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: Clipboard::new()?,
        })
    }
}

impl ClipboardBridge for ArboardClipboard {
    fn name(&self) -> &'static str {
        "arboard"
    }

    fn put_text(&mut self, text: &str) -> Result<()> {
        self.inner.clear()?;
        self.inner.set_text(text.to_owned())?;
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        Ok(self.inner.get_text()?)
    }

    fn put_image_bitmap(&mut self, bitmap: &BitmapPayload) -> Result<()> {
        let rgba = DynamicImage::ImageRgb8(bitmap.image().clone()).to_rgba8();
        let data = ImageData {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            bytes: Cow::Owned(rgba.into_raw()),
        };

        self.inner.clear()?;
        self.inner.set_image(data)?;
        Ok(())
    }
}
