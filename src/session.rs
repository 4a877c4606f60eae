//! State behind the main window
//!
//! A [`QrSession`] owns the image currently shown in the preview and the
//! image used as the window icon. Regenerating swaps in a new image before
//! the previous file is deleted, so exactly one preview file exists between
//! actions.

use crate::clipboard::{BitmapPayload, ClipboardBridge};
use crate::error::Result;
use crate::generator::{GeneratedImage, QrGenerator};
use std::path::Path;

/// Preview state owned by the main window
#[derive(Debug)]
pub struct QrSession {
    generator: QrGenerator,
    current: GeneratedImage,
    icon: Option<GeneratedImage>,
    generation: u64,
}

impl QrSession {
    /// Generate the startup preview and, if requested, the icon image.
    pub fn start(
        generator: QrGenerator,
        default_text: &str,
        icon_text: Option<&str>,
    ) -> Result<Self> {
        let icon = icon_text.map(|text| generator.generate(text)).transpose()?;
        let current = generator.generate(default_text)?;

        tracing::info!(
            text = default_text,
            path = %current.path().display(),
            "Session started"
        );

        Ok(Self {
            generator,
            current,
            icon,
            generation: 0,
        })
    }

    /// Image shown in the preview
    pub fn current(&self) -> &GeneratedImage {
        &self.current
    }

    /// Image used as the window icon
    pub fn icon(&self) -> Option<&GeneratedImage> {
        self.icon.as_ref()
    }

    /// Number of successful regenerations; changes whenever the preview does
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the preview with a new image for `text`.
    ///
    /// On failure the previous image stays current.
    pub fn regenerate(&mut self, text: &str) -> Result<&GeneratedImage> {
        let next = self.generator.generate(text)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.generation += 1;

        tracing::info!(
            text,
            generation = self.generation,
            path = %self.current.path().display(),
            "Regenerated preview"
        );
        drop(previous);

        Ok(&self.current)
    }

    /// Copy the current image byte-for-byte to `destination`.
    pub fn save_to(&self, destination: &Path) -> Result<u64> {
        let bytes = self.current.read_bytes()?;
        std::fs::write(destination, &bytes)?;
        tracing::info!(path = %destination.display(), bytes = bytes.len(), "Saved QR image");
        Ok(bytes.len() as u64)
    }

    /// Put the current image on the clipboard as a DIB; returns the payload length.
    pub fn copy_image(&self, clipboard: &mut dyn ClipboardBridge) -> Result<usize> {
        let bitmap = BitmapPayload::from_png(self.current.path())?;
        clipboard.put_image_bitmap(&bitmap)?;
        tracing::info!(
            backend = clipboard.name(),
            bytes = bitmap.len(),
            "Copied QR image to clipboard"
        );
        Ok(bitmap.len())
    }

    /// Delete the preview and icon files.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for QrSession {
    fn drop(&mut self) {
        tracing::info!(generation = self.generation, "Session closed");
    }
}
