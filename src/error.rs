//! Error types for qrmaker operations

use thiserror::Error;

/// Result type alias using qrmaker's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrmaker operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Windowing or rendering backend error
    #[error("GUI error: {0}")]
    Gui(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<arboard::Error> for Error {
    fn from(e: arboard::Error) -> Self {
        Error::Clipboard(e.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Self {
        Error::Io(e.error)
    }
}

impl From<eframe::Error> for Error {
    fn from(e: eframe::Error) -> Self {
        Error::Gui(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(Error::from(io), Error::Io(_)));

        let image = image::load_from_memory(b"not an image").unwrap_err();
        assert!(matches!(Error::from(image), Error::Image(_)));
    }

    #[test]
    fn persist_error_keeps_the_io_source() {
        let dir = tempfile::tempdir().unwrap();
        let file = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
        let err = file
            .persist(dir.path().join("missing").join("qr.png"))
            .unwrap_err();
        assert!(matches!(Error::from(err), Error::Io(_)));
    }
}
