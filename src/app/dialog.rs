//! Save-as dialog for exporting the current QR image.
//!
//! The dialog sits behind [`SaveDialog`] so tests can inject a fixed answer
//! instead of opening a native window.

use std::path::PathBuf;

/// Asks the user where to write the image.
pub trait SaveDialog {
    /// The chosen destination, or `None` if the user cancelled.
    fn choose_destination(&self) -> Option<PathBuf>;
}

/// Native dialog via `rfd`, restricted to PNG files.
///
/// The platform dialog asks for confirmation before overwriting.
#[derive(Debug, Clone)]
pub struct RfdSaveDialog {
    default_name: String,
}

impl Default for RfdSaveDialog {
    fn default() -> Self {
        Self {
            default_name: "qr.png".to_string(),
        }
    }
}

impl SaveDialog for RfdSaveDialog {
    fn choose_destination(&self) -> Option<PathBuf> {
        let path = rfd::FileDialog::new()
            .set_title("Save QR")
            .add_filter("Image", &["png"])
            .set_file_name(&self.default_name)
            .save_file()?;

        tracing::debug!("User chose save destination: {}", path.display());
        Some(with_png_extension(path))
    }
}

/// Append `.png` when the chosen name has no extension.
pub fn with_png_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("png");
    }
    path
}
