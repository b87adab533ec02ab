//! Input decoding using simdutf8, chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Check if the given bytes are valid UTF-8.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (EF BB BF).
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(UTF8_BOM)
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Decode one line as text.
///
/// Valid UTF-8 is borrowed; anything else is replaced lossily.
pub fn decode_line(line: &[u8]) -> Cow<'_, str> {
    match from_utf8(line) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => String::from_utf8_lossy(line),
    }
}

/// Transcode the input to UTF-8 if it is not UTF-8 already.
///
/// UTF-16 is recognized only by its BOM. Other non-UTF-8 input is
/// classified with chardetng. The returned flag is true when the data
/// was transcoded; transcoded output never carries a BOM.
pub fn detect_and_transcode(data: &[u8]) -> (Cow<'_, [u8]>, bool) {
    if data.starts_with(b"\xFF\xFE") {
        return (transcode(encoding_rs::UTF_16LE, data), true);
    }
    if data.starts_with(b"\xFE\xFF") {
        return (transcode(encoding_rs::UTF_16BE, data), true);
    }

    if is_utf8(data) {
        return (Cow::Borrowed(data), false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    // Mostly UTF-8 with a few bad bytes; lines are decoded lossily later.
    if encoding == encoding_rs::UTF_8 {
        return (Cow::Borrowed(data), false);
    }

    (transcode(encoding, data), true)
}

fn transcode(encoding: &'static encoding_rs::Encoding, data: &[u8]) -> Cow<'static, [u8]> {
    debug!(encoding = encoding.name(), bytes = data.len(), "transcoding input to UTF-8");
    let (decoded, _, had_errors) = encoding.decode(data);
    if had_errors {
        debug!(encoding = encoding.name(), "malformed sequences replaced while transcoding");
    }
    Cow::Owned(decoded.into_owned().into_bytes())
}
