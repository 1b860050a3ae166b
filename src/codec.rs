//! Transfer-encoding decoding for receipt bodies

use crate::error::{ParseError, Result};
use crate::types::LineSeparator;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Body text after transfer decoding, with the separator to split it on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub line_separator: LineSeparator,
}

impl DecodedBody {
    /// Iterate over the body lines using the selected separator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(self.line_separator.as_str())
    }
}

/// Check whether a Content-Transfer-Encoding value names quoted-printable
#[must_use]
pub fn is_quoted_printable(transfer_encoding: &str) -> bool {
    transfer_encoding
        .trim_start()
        .get(..16)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("quoted-printable"))
}

/// Decode a body according to its transfer encoding.
///
/// Quoted-printable bodies that decode to non-ASCII text are split on CRLF,
/// everything else on LF. Some providers only emit CRLF line endings when
/// the body carries non-ASCII characters.
pub fn decode_body(text: &str, transfer_encoding: &str) -> Result<DecodedBody> {
    if !is_quoted_printable(transfer_encoding) {
        return Ok(DecodedBody {
            text: text.to_string(),
            line_separator: LineSeparator::Lf,
        });
    }

    let decoded = decode_quoted_printable(text.as_bytes());
    let text = String::from_utf8(decoded).map_err(|e| ParseError::Decode(e.to_string()))?;
    let line_separator = if text.is_ascii() {
        LineSeparator::Lf
    } else {
        LineSeparator::CrLf
    };
    debug!(?line_separator, "Decoded quoted-printable body");

    Ok(DecodedBody {
        text,
        line_separator,
    })
}

/// Decode a body after dropping stray non-ASCII characters.
///
/// Recovery path for archives whose quoted-printable bodies carry raw
/// non-ASCII bytes. Those characters are lost.
pub fn decode_lossy(text: &str, transfer_encoding: &str) -> Result<DecodedBody> {
    if !is_quoted_printable(transfer_encoding) {
        return decode_body(text, transfer_encoding);
    }

    let filtered = strip_non_ascii(text);
    if let Cow::Owned(ref stripped) = filtered {
        warn!(
            dropped = text.len() - stripped.len(),
            "Stripped non-ASCII bytes before quoted-printable decoding"
        );
    }
    decode_body(&filtered, transfer_encoding)
}

/// Remove every non-ASCII character, borrowing when there is nothing to drop
#[must_use]
pub fn strip_non_ascii(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(char::is_ascii).collect())
    }
}

/// Decode quoted-printable bytes.
///
/// Handles `=XX` escapes and soft line breaks (`=\r\n`, `=\n`). Hard line
/// endings are kept as they are. A malformed `=` sequence is copied through.
#[must_use]
pub fn decode_quoted_printable(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;

    while i < src.len() {
        let b = src[i];
        if b != b'=' {
            out.push(b);
            i += 1;
            continue;
        }

        let escaped = match (src.get(i + 1).copied(), src.get(i + 2).copied()) {
            (Some(b'\r'), Some(b'\n')) => Some(3),
            (Some(b'\n'), _) => Some(2),
            (Some(hi), Some(lo)) => match (hex_value(hi), hex_value(lo)) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    Some(3)
                }
                _ => None,
            },
            _ => None,
        };

        if let Some(consumed) = escaped {
            i += consumed;
        } else {
            out.push(b'=');
            i += 1;
        }
    }

    out
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
