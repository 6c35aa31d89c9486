//! Text normalization before layout.
//!
//! Two artefacts of the source file would otherwise end up on the page:
//! a leading U+FEFF left over from the byte-order mark, and carriage returns
//! from CRLF or classic-Mac line endings, which builtin PDF fonts render as
//! stray glyphs.

/// The marker code point a byte-order mark decodes to.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Strip a leading marker and collapse CRLF / lone CR into LF.
///
/// Only a marker at position 0 is removed. CRLF is replaced before lone CR so
/// that `"\r\n"` becomes one line feed, not two.
pub fn normalize(text: &str) -> String {
    let body = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    body.replace("\r\n", "\n").replace('\r', "\n")
}

/// `true` if [`normalize`] would return `text` unchanged.
pub fn is_normalized(text: &str) -> bool {
    !text.starts_with(BYTE_ORDER_MARK) && !text.contains('\r')
}
