use crate::error::AppResult;

/// Decodes a plain-text upload: strict UTF-8 first, Latin-1 otherwise.
///
/// Every byte sequence is valid Latin-1, so the fallback never fails; the
/// `AppResult` keeps the signature in line with the other extractors.
pub fn decode_text(bytes: &[u8]) -> AppResult<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            tracing::debug!(
                valid_up_to = e.valid_up_to(),
                "Text is not valid UTF-8, decoding as Latin-1"
            );
            Ok(decode_latin1(bytes))
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
