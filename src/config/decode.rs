//! Byte-to-text decoding for configuration files
//!
//! UTF-8 (with or without BOM) is the fast path. Anything else is decoded
//! with a detected legacy encoding rather than refused, so a stray Latin-1
//! byte in a comment does not make a file unloadable.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

/// Decode `bytes`, returning the text and the label of the encoding used.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    // A BOM is authoritative.
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding.name());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (Cow::Borrowed(text), UTF_8.name());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, used, _had_errors) = encoding.decode(bytes);
    (text, used.name())
}
