//! Shared utility functions.

use std::borrow::Cow;

/// Shorten `s` to at most `max_chars` characters for log output, appending
/// `...` when something was cut. Never splits a character.
pub fn preview(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((end, _)) => Cow::Owned(format!("{}...", &s[..end])),
    }
}
