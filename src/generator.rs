//! Generation of QR images into uniquely named temp files

use crate::config::OutputOptions;
use crate::error::Result;
use crate::qr::{QrEncoder, QrRequest, QrStyle};
use crate::tempfiles::delete_temp_file;
use image::ImageFormat;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// A QR image on disk, owned by whoever holds the handle.
///
/// Dropping the handle deletes the file.
#[derive(Debug)]
pub struct GeneratedImage {
    path: PathBuf,
    text: String,
    style: QrStyle,
    width: u32,
    height: u32,
}

impl GeneratedImage {
    /// Location of the PNG file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text the image encodes
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parameters the image was rendered with
    pub fn style(&self) -> &QrStyle {
        &self.style
    }

    /// Pixel dimensions as `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read the PNG bytes back from disk
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

impl Drop for GeneratedImage {
    fn drop(&mut self) {
        delete_temp_file(&self.path);
    }
}

/// Renders QR requests and writes them as PNG temp files
#[derive(Debug, Clone)]
pub struct QrGenerator {
    encoder: QrEncoder,
    temp_dir: Option<PathBuf>,
    prefix: String,
}

impl QrGenerator {
    /// Create a generator writing into the OS temp directory
    pub fn new(style: QrStyle) -> Self {
        Self::with_output(style, &OutputOptions::default())
    }

    /// Create a generator honoring the output options
    pub fn with_output(style: QrStyle, output: &OutputOptions) -> Self {
        Self {
            encoder: QrEncoder::new(style),
            temp_dir: output.temp_dir.clone(),
            prefix: output.file_prefix.clone(),
        }
    }

    /// Directory new files are created in
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Encode `text` and write it to a fresh temp file.
    ///
    /// Every call creates a new file; existing files are never reused.
    pub fn generate(&self, text: &str) -> Result<GeneratedImage> {
        let request = QrRequest::new(text);
        let image = self.encoder.encode(&request)?;

        let dir = self.temp_dir();
        std::fs::create_dir_all(&dir)?;
        let file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(".png")
            .tempfile_in(&dir)?;

        let (file, path) = file.keep()?;
        let handle = GeneratedImage {
            path,
            text: request.text().to_string(),
            style: *self.encoder.style(),
            width: image.width(),
            height: image.height(),
        };

        // The handle already owns the path, so a failed write still cleans up.
        let mut writer = BufWriter::new(file);
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.into_inner().map_err(|e| e.into_error())?;

        tracing::debug!(
            path = %handle.path.display(),
            width = handle.width,
            height = handle.height,
            "Generated QR image"
        );

        Ok(handle)
    }
}
