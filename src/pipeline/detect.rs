//! Encoding detection from the byte-order mark.
//!
//! Only the first three bytes are inspected. There is no content sniffing:
//! a file without a marker is assumed to be UTF-8, and anything else that
//! lacks a marker will fail strict decoding (or be mangled by lenient
//! decoding). That is an accepted limitation of BOM-only detection.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// The encodings the detector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EncodingTag {
    /// UTF-8, with or without a marker. Also the fallback.
    #[default]
    #[serde(rename = "utf8")]
    Utf8,
    /// UTF-16, little-endian.
    #[serde(rename = "utf16-le")]
    Utf16Le,
    /// UTF-16, big-endian.
    #[serde(rename = "utf16-be")]
    Utf16Be,
}

impl EncodingTag {
    /// Short lowercase name, matching the serialised form.
    pub fn name(self) -> &'static str {
        match self {
            EncodingTag::Utf8 => "utf8",
            EncodingTag::Utf16Le => "utf16-le",
            EncodingTag::Utf16Be => "utf16-be",
        }
    }

    /// The byte-order mark that identifies this encoding.
    pub fn bom(self) -> &'static [u8] {
        match self {
            EncodingTag::Utf8 => UTF8_BOM,
            EncodingTag::Utf16Le => UTF16_LE_BOM,
            EncodingTag::Utf16Be => UTF16_BE_BOM,
        }
    }

    /// The `encoding_rs` codec used to decode this encoding.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            EncodingTag::Utf8 => encoding_rs::UTF_8,
            EncodingTag::Utf16Le => encoding_rs::UTF_16LE,
            EncodingTag::Utf16Be => encoding_rs::UTF_16BE,
        }
    }
}

impl fmt::Display for EncodingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the encoding of `bytes` from its leading byte-order mark.
///
/// Priority: UTF-8 marker, then UTF-16 LE, then UTF-16 BE, else UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> EncodingTag {
    if bytes.starts_with(UTF8_BOM) {
        EncodingTag::Utf8
    } else if bytes.starts_with(UTF16_LE_BOM) {
        EncodingTag::Utf16Le
    } else if bytes.starts_with(UTF16_BE_BOM) {
        EncodingTag::Utf16Be
    } else {
        EncodingTag::Utf8
    }
}
