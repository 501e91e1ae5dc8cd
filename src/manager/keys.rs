use base64::{STANDARD, decode_config};

#[derive(Debug)]
pub enum KeyError {
    Empty,
    BadLength,
    Decode(base64::DecodeError),
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::Empty => f.write_str("server key is empty"),
            KeyError::BadLength => f.write_str("server key has an impossible length"),
            KeyError::Decode(err) => write!(f, "server key is not valid base64url: {err}"),
        }
    }
}

/// Convert the backend's base64url VAPID public key into the raw byte form
/// the platform expects: translate `-`→`+` and `_`→`/`, restore `=`
/// padding to a multiple of 4, then decode with the standard alphabet.
pub fn decode_server_key(encoded: &str) -> Result<Vec<u8>, KeyError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(KeyError::Empty);
    }

    let mut translated: String = trimmed
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    match translated.len() % 4 {
        0 => {}
        2 => translated.push_str("=="),
        3 => translated.push('='),
        // a length of 4n+1 cannot come out of any base64 encoder
        _ => return Err(KeyError::BadLength),
    }

    decode_config(&translated, STANDARD).map_err(KeyError::Decode)
}
