//! In-process clipboard

use super::{BitmapPayload, ClipboardBridge, ClipboardPayload};
use crate::error::{Error, Result};

/// Clipboard that keeps the last payload in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<ClipboardPayload>,
}

impl MemoryClipboard {
    /// The payload currently held, if any
    pub fn contents(&self) -> Option<&ClipboardPayload> {
        self.contents.as_ref()
    }
}

impl ClipboardBridge for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn put_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(ClipboardPayload::Text(text.to_string()));
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        match &self.contents {
            Some(ClipboardPayload::Text(text)) => Ok(text.clone()),
            Some(ClipboardPayload::Bitmap(_)) => {
                Err(Error::Clipboard("Clipboard holds an image, not text".to_string()))
            }
            None => Err(Error::Clipboard("Clipboard is empty".to_string())),
        }
    }

    fn put_image_bitmap(&mut self, bitmap: &BitmapPayload) -> Result<()> {
        self.contents = Some(ClipboardPayload::Bitmap(bitmap.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn text_round_trips() {
        let mut clipboard = MemoryClipboard::default();
        assert!(clipboard.get_text().is_err());

        clipboard.put_text("https://example.com").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "https://example.com");
    }

    #[test]
    fn image_replaces_text() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.put_text("old").unwrap();

        let bitmap = BitmapPayload::from_rgb(RgbImage::new(2, 2)).unwrap();
        clipboard.put_image_bitmap(&bitmap).unwrap();

        assert!(clipboard.get_text().is_err());
        assert_eq!(
            clipboard.contents(),
            Some(&ClipboardPayload::Bitmap(bitmap))
        );
    }
}
