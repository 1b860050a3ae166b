//! Message normalization: header extraction and body flattening

use crate::error::{ParseError, Result};
use crate::html::render_html;
use crate::types::{MessagePart, NOT_AVAILABLE, NormalizedEmail};
use mailparse::body::Body;
use mailparse::{MailHeaderMap, ParsedMail};
use tracing::debug;

/// Parse a raw archived message into a `NormalizedEmail`.
///
/// Fails when the record is not a mail message or has no `From` header.
pub fn normalize_email(raw: &[u8]) -> Result<NormalizedEmail> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;
    let headers = &parsed.headers;

    let sender = headers
        .get_first_value("From")
        .ok_or_else(|| ParseError::MissingHeader("From".into()))?;

    let parts = if parsed.subparts.is_empty() {
        vec![MessagePart::from_payload(&raw_payload(&parsed))]
    } else {
        flatten_parts(&parsed.subparts)
            .into_iter()
            .map(MessagePart::from_leaf)
            .collect()
    };

    debug!(sender = %sender, parts = parts.len(), "Normalized email");

    Ok(NormalizedEmail {
        sender,
        receiver: headers.get_first_value("To"),
        subject: headers.get_first_value("Subject"),
        labels: headers.get_first_value("X-Gmail-Labels"),
        date: headers.get_first_value("Date"),
        transfer_encoding: headers
            .get_first_value("Content-Transfer-Encoding")
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        parts,
    })
}

/// Collect the leaves of a multipart tree, depth-first and left to right.
///
/// A list without nested multipart parts comes back unchanged.
#[must_use]
pub fn flatten_parts<'a, 'b>(parts: &'b [ParsedMail<'a>]) -> Vec<&'b ParsedMail<'a>> {
    let mut leaves = Vec::with_capacity(parts.len());
    collect_leaves(parts, &mut leaves);
    leaves
}

fn collect_leaves<'a, 'b>(parts: &'b [ParsedMail<'a>], leaves: &mut Vec<&'b ParsedMail<'a>>) {
    for part in parts {
        if part.subparts.is_empty() {
            leaves.push(part);
        } else {
            collect_leaves(&part.subparts, leaves);
        }
    }
}

/// Body bytes of a part as stored, without transfer decoding
fn raw_payload(part: &ParsedMail) -> String {
    match part.get_body_encoded() {
        Body::Base64(body) | Body::QuotedPrintable(body) => {
            String::from_utf8_lossy(body.get_raw()).into_owned()
        }
        Body::SevenBit(body) | Body::EightBit(body) => {
            String::from_utf8_lossy(body.get_raw()).into_owned()
        }
        Body::Binary(body) => String::from_utf8_lossy(body.get_raw()).into_owned(),
    }
}

impl MessagePart {
    /// Classify a bare string payload; it is rendered as HTML
    #[must_use]
    pub fn from_payload(payload: &str) -> Self {
        Self {
            content_type: NOT_AVAILABLE.to_string(),
            transfer_encoding: NOT_AVAILABLE.to_string(),
            text: render_html(payload),
        }
    }

    /// Classify a leaf of a multipart body by its content type and encoding
    #[must_use]
    pub fn from_leaf(part: &ParsedMail) -> Self {
        let content_type = part.ctype.mimetype.to_lowercase();
        let transfer_encoding = part
            .headers
            .get_first_value("Content-Transfer-Encoding")
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let base64 = transfer_encoding.to_ascii_lowercase().contains("base64");

        let text = if content_type.contains("text/plain") && !base64 {
            Some(raw_payload(part))
        } else if content_type.contains("text/html") && !base64 {
            part.get_body().ok().and_then(|html| render_html(&html))
        } else {
            debug!(
                content_type = %content_type,
                transfer_encoding = %transfer_encoding,
                "Skipping undecodable part"
            );
            None
        };

        Self {
            content_type,
            transfer_encoding,
            text,
        }
    }
}
