//! Provider-specific receipt extraction

mod deliveroo;
mod doordash;
mod uber;

pub use deliveroo::DeliverooExtractor;
pub use doordash::DoorDashExtractor;
pub use uber::UberExtractor;

use crate::codec::{DecodedBody, decode_body};
use crate::types::{NormalizedEmail, Provider, Receipt};
use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

/// Extraction strategy for one delivery service
pub trait ReceiptExtractor {
    /// Service this extractor understands
    fn provider(&self) -> Provider;

    /// Build a receipt from a normalized email.
    ///
    /// Missing data is not an error: fields that cannot be found keep their
    /// defaults.
    fn parse(&self, email: &NormalizedEmail) -> Receipt;
}

impl Provider {
    /// Extractor implementing this provider's rules
    #[must_use]
    pub fn extractor(self) -> &'static dyn ReceiptExtractor {
        match self {
            Self::Uber => &UberExtractor,
            Self::DoorDash => &DoorDashExtractor,
            Self::Deliveroo => &DeliverooExtractor,
        }
    }
}

/// Decode the first plain-text part of a multipart receipt
fn plain_text_body(email: &NormalizedEmail, provider: Provider) -> Option<DecodedBody> {
    let Some(part) = email.first_plain_text() else {
        warn!(%provider, sender = %email.sender, "No text/plain part in receipt");
        return None;
    };
    let text = part.text.as_deref()?;

    match decode_body(text, &part.transfer_encoding) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(%provider, "Unable to decode receipt body: {e}");
            None
        }
    }
}

/// Parse the first capture group of `pattern` in `line` as an exact decimal
fn capture_amount(pattern: &Regex, line: &str) -> Option<Decimal> {
    let digits = pattern.captures(line)?.get(1)?.as_str();
    match digits.parse::<Decimal>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!("Ignoring unparseable amount {digits}: {e}");
            None
        }
    }
}
