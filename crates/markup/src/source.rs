// ABOUTME: Loading documents from bytes or readers, decoding non-UTF-8 input to text.
// ABOUTME: The only place I/O failures enter the crate; they surface as parse faults.

use std::io::Read;

use tracing::debug;

use crate::error::{HtmlError, Result};

/// Decode document bytes to a String.
///
/// Valid UTF-8 is returned byte for byte. Otherwise `charset` (an encoding
/// label such as `iso-8859-1`) is used when recognized, falling back to
/// chardetng detection.
pub fn decode_bytes(bytes: &[u8], charset: Option<&str>) -> String {
    if let Some(encoding) = charset.and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes())) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    debug!(encoding = encoding.name(), "detected document encoding");
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Read a whole document from `reader`.
pub fn read_document<R: Read>(mut reader: R, charset: Option<&str>) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(HtmlError::parse)?;
    Ok(decode_bytes(&bytes, charset))
}
