// Percent-encoding of cookie components

use crate::error::{PanelError, Result};

/// Decode a cookie name or value.
///
/// Follows `decodeURIComponent`: a `%` not followed by two hex digits, or
/// escapes that do not form valid UTF-8, are errors.
pub fn decode_component(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(PanelError::Decode(format!(
                    "malformed escape at byte {} in {:?}",
                    i, input
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PanelError::Decode(format!("{:?}: {}", input, e)))
}

/// Encode a cookie value. Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through.
pub fn encode_component(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}
