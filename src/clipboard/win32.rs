//! Native Windows clipboard writing raw `CF_UNICODETEXT` and `CF_DIB` data

use super::{BitmapPayload, ClipboardBridge};
use crate::error::{Error, Result};
use windows::Win32::Foundation::{GlobalFree, HANDLE};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalLock, GlobalUnlock};
use windows::Win32::System::Ole::{CF_DIB, CF_UNICODETEXT};

/// Windows clipboard.
///
/// The clipboard is opened and closed around every write.
#[derive(Debug, Default)]
pub struct Win32Clipboard;

impl Win32Clipboard {
    /// Create a handle; nothing is opened until a write happens
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardBridge for Win32Clipboard {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn put_text(&mut self, text: &str) -> Result<()> {
        let wide: Vec<u8> = text
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        set_clipboard_bytes(u32::from(CF_UNICODETEXT.0), "CF_UNICODETEXT", &wide)
    }

    fn get_text(&mut self) -> Result<String> {
        Ok(arboard::Clipboard::new()?.get_text()?)
    }

    fn put_image_bitmap(&mut self, bitmap: &BitmapPayload) -> Result<()> {
        set_clipboard_bytes(u32::from(CF_DIB.0), "CF_DIB", bitmap.dib())
    }
}

/// Open, empty, write one format, close.
fn set_clipboard_bytes(format: u32, format_name: &str, bytes: &[u8]) -> Result<()> {
    // SAFETY: the global block is sized to `bytes`, written only while locked,
    // and ownership passes to the system once SetClipboardData succeeds.
    unsafe {
        OpenClipboard(None)
            .map_err(|e| Error::Clipboard(format!("OpenClipboard failed: {e:?}")))?;

        if let Err(e) = EmptyClipboard() {
            let _ = CloseClipboard();
            return Err(Error::Clipboard(format!("EmptyClipboard failed: {e:?}")));
        }

        let hglobal = match GlobalAlloc(GMEM_MOVEABLE, bytes.len()) {
            Ok(hglobal) => hglobal,
            Err(e) => {
                let _ = CloseClipboard();
                return Err(Error::Clipboard(format!("GlobalAlloc failed: {e:?}")));
            }
        };

        let ptr = GlobalLock(hglobal) as *mut u8;
        if ptr.is_null() {
            let _ = GlobalFree(Some(hglobal));
            let _ = CloseClipboard();
            return Err(Error::Clipboard("GlobalLock failed".to_string()));
        }
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, bytes.len());
        let _ = GlobalUnlock(hglobal);

        if let Err(e) = SetClipboardData(format, Some(HANDLE(hglobal.0))) {
            let _ = GlobalFree(Some(hglobal));
            let _ = CloseClipboard();
            return Err(Error::Clipboard(format!(
                "SetClipboardData({format_name}) failed: {e:?}"
            )));
        }

        let _ = CloseClipboard();
    }

    tracing::debug!(format = format_name, bytes = bytes.len(), "Wrote clipboard data");
    Ok(())
}
