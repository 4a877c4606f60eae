//! Copy/Paste actions for the URL field's right-click menu.
//!
//! Both actions are best effort: a busy or empty clipboard is logged and
//! otherwise ignored.

use crate::clipboard::ClipboardBridge;

/// Slice of `text` between two char indices, in either order. `None` when empty.
pub fn selected_text(text: &str, a: usize, b: usize) -> Option<&str> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if start == end {
        return None;
    }

    let byte_at = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let slice = &text[byte_at(start)..byte_at(end)];
    (!slice.is_empty()).then_some(slice)
}

/// Put the selected part of `text` on the clipboard.
pub fn copy_selection(
    clipboard: &mut dyn ClipboardBridge,
    text: &str,
    selection: Option<(usize, usize)>,
) {
    let Some(selected) = selection.and_then(|(a, b)| selected_text(text, a, b)) else {
        tracing::debug!("Copy requested with nothing selected");
        return;
    };

    if let Err(e) = clipboard.put_text(selected) {
        tracing::debug!(backend = clipboard.name(), "Copy to clipboard ignored: {e}");
    }
}

/// Append the clipboard's text to the end of `text`.
pub fn paste_at_end(clipboard: &mut dyn ClipboardBridge, text: &mut String) {
    match clipboard.get_text() {
        Ok(pasted) => text.push_str(&pasted),
        Err(e) => tracing::debug!(backend = clipboard.name(), "Paste ignored: {e}"),
    }
}
