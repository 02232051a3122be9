use std::borrow::Cow;

pub const DEFAULT_PREVIEW_LEN: usize = 100;
pub const ELLIPSIS: &str = "...";

/// Shortens `text` to `max_len` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

#[must_use]
pub fn preview(text: &str) -> Cow<'_, str> {
    truncate(text, DEFAULT_PREVIEW_LEN)
}
