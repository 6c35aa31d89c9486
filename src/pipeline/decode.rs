//! Byte decoding: raw input bytes → `String` under the detected encoding.
//!
//! The byte-order mark is *not* consumed here. It decodes to U+FEFF like any
//! other code point and the normalizer strips it, so the decoder stays a pure
//! function of `(bytes, encoding, policy)`.

use crate::config::DecodePolicy;
use crate::error::Txt2PdfError;
use crate::pipeline::detect::EncodingTag;
use encoding_rs::DecoderResult;
use tracing::{debug, warn};

/// Decode `bytes` as `tag`, applying `policy` to malformed sequences.
pub fn decode(bytes: &[u8], tag: EncodingTag, policy: DecodePolicy) -> Result<String, Txt2PdfError> {
    let text = match policy {
        DecodePolicy::Strict => decode_strict(bytes, tag)?,
        DecodePolicy::Lenient => decode_lenient(bytes, tag),
    };
    debug!(
        "Decoded {} bytes as {} → {} chars",
        bytes.len(),
        tag,
        text.chars().count()
    );
    Ok(text)
}

/// Reject the first malformed sequence, reporting its byte offset.
fn decode_strict(bytes: &[u8], tag: EncodingTag) -> Result<String, Txt2PdfError> {
    let mut decoder = tag.encoding().new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len());
    let mut text = String::with_capacity(capacity);
    let mut total_read = 0usize;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&bytes[total_read..], &mut text, true);
        total_read += read;
        match result {
            DecoderResult::InputEmpty => return Ok(text),
            DecoderResult::OutputFull => {
                let remaining = bytes.len() - total_read;
                text.reserve(
                    decoder
                        .max_utf8_buffer_length_without_replacement(remaining)
                        .unwrap_or(remaining)
                        .max(4),
                );
            }
            DecoderResult::Malformed(bad_len, consumed_after) => {
                let offset = total_read - consumed_after as usize - bad_len as usize;
                return Err(Txt2PdfError::DecodeFailed {
                    encoding: tag,
                    offset,
                });
            }
        }
    }
}

/// Substitute U+FFFD for malformed sequences.
fn decode_lenient(bytes: &[u8], tag: EncodingTag) -> String {
    let (text, had_errors) = tag.encoding().decode_without_bom_handling(bytes);
    if had_errors {
        warn!(
            "Input contained byte sequences that are invalid {}; replaced with U+FFFD",
            tag
        );
    }
    text.into_owned()
}
