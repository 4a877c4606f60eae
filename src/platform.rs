//! Window chrome tweaks that need the native window handle

use crate::error::Result;

/// DWM attribute asking for an immersive dark title bar
#[cfg(windows)]
const DWMWA_USE_IMMERSIVE_DARK_MODE: i32 = 20;

/// Ask the window manager to draw a dark title bar.
#[cfg(windows)]
pub fn apply_dark_title_bar(frame: &eframe::Frame) -> Result<()> {
    use crate::error::Error;
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use std::ffi::c_void;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    let handle = frame
        .window_handle()
        .map_err(|e| Error::Gui(format!("No native window handle: {e}")))?;
    let RawWindowHandle::Win32(win32) = handle.as_raw() else {
        return Err(Error::Gui("Window handle is not a Win32 handle".to_string()));
    };

    let hwnd = HWND(win32.hwnd.get() as *mut c_void);
    let enabled: i32 = 1;
    // SAFETY: `enabled` outlives the call and its size is passed alongside.
    unsafe {
        DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(DWMWA_USE_IMMERSIVE_DARK_MODE),
            std::ptr::from_ref(&enabled).cast::<c_void>(),
            std::mem::size_of::<i32>() as u32,
        )
    }
    .map_err(|e| Error::Gui(format!("DwmSetWindowAttribute failed: {e:?}")))
}

/// Title bar colors are left to the window manager on this platform.
#[cfg(not(windows))]
pub fn apply_dark_title_bar(_frame: &eframe::Frame) -> Result<()> {
    Ok(())
}
