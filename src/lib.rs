//! qrmaker - desktop QR code maker
//!
//! Type a URL, preview its QR code, copy the image to the clipboard or save
//! it as PNG.
//!
//! # Features
//!
//! - **Generation**: `qrcode` rendering with a configurable box size, border and colors
//! - **Temp files**: every preview lives in its own temp file, deleted when replaced
//! - **Clipboard**: raw `CF_DIB` / `CF_UNICODETEXT` on Windows, `arboard` elsewhere
//! - **GUI**: `eframe`/`egui` window with an optional Copy/Paste context menu
//!
//! # Example
//!
//! ```no_run
//! use qrmaker::{QrDecoder, QrGenerator, QrStyle};
//!
//! fn main() -> qrmaker::Result<()> {
//!     let generator = QrGenerator::new(QrStyle::default());
//!     let image = generator.generate("https://example.com")?;
//!
//!     let text = QrDecoder::new().decode_file(image.path())?;
//!     assert_eq!(text, "https://example.com");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod platform;
pub mod qr;
pub mod session;
pub mod tempfiles;

// Re-exports for convenience
pub use error::{Error, Result};

pub use app::{AppOptions, QrMakerApp};
pub use clipboard::{BitmapPayload, ClipboardBridge, ClipboardPayload, MemoryClipboard};
pub use config::{
    LogRotation, LoggingOptions, OutputOptions, QrMakerConfig, QrOptions, WindowOptions,
};
pub use generator::{GeneratedImage, QrGenerator};
pub use qr::{QrDecoder, QrEncoder, QrRequest, QrStyle};
pub use session::QrSession;
