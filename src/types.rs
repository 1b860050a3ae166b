//! Core types for normalized emails and extracted receipts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used for receipt fields that could not be extracted
pub const UNKNOWN: &str = "Unknown";

/// Marker for content type or transfer encoding of a bare string payload
pub const NOT_AVAILABLE: &str = "NA";

/// An archived email reduced to the headers and body parts receipts need
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedEmail {
    /// From header, as stored
    pub sender: String,

    /// To header
    pub receiver: Option<String>,

    /// Subject header
    pub subject: Option<String>,

    /// X-Gmail-Labels header
    pub labels: Option<String>,

    /// Date header, unparsed
    pub date: Option<String>,

    /// Content-Transfer-Encoding of the top-level message ("NA" if absent)
    pub transfer_encoding: String,

    /// Flattened body leaves in document order
    pub parts: Vec<MessagePart>,
}

impl NormalizedEmail {
    /// First part whose content type is `text/plain` and which carries text
    #[must_use]
    pub fn first_plain_text(&self) -> Option<&MessagePart> {
        self.parts
            .iter()
            .find(|p| p.content_type.starts_with("text/plain") && p.text.is_some())
    }
}

/// A single non-multipart leaf of a message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    /// Lowercase MIME type, or "NA" for a bare string payload
    pub content_type: String,

    /// Content-Transfer-Encoding header, or "NA"
    pub transfer_encoding: String,

    /// Readable text; `None` when the part could not be decoded
    pub text: Option<String>,
}

/// Delivery service that issued a receipt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provider {
    Uber,
    DoorDash,
    Deliveroo,
}

impl Provider {
    /// Human readable service name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uber => "Uber Eats",
            Self::DoorDash => "DoorDash",
            Self::Deliveroo => "Deliveroo",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Line terminator used to split a decoded body
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineSeparator {
    #[default]
    Lf,
    CrLf,
}

impl LineSeparator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Structured data extracted from one delivery receipt email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Service that sent the receipt
    pub provider: Provider,

    /// Provider order identifier
    pub order_id: String,

    /// Order page URL (DoorDash only)
    pub url: Option<String>,

    /// Sum of every total line found in the body
    pub amount_total: Decimal,

    /// Restaurant name
    pub restaurant: String,

    /// Separator the body was split on
    pub line_separator: LineSeparator,

    /// Subject of the source email
    pub subject: Option<String>,

    /// Raw Date header of the source email
    pub date: Option<String>,
}

impl Receipt {
    /// Empty receipt with default values for the given provider
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            order_id: UNKNOWN.to_string(),
            url: None,
            amount_total: Decimal::ZERO,
            restaurant: UNKNOWN.to_string(),
            line_separator: LineSeparator::default(),
            subject: None,
            date: None,
        }
    }

    /// Empty receipt carrying the subject and date of `email`
    #[must_use]
    pub fn for_email(provider: Provider, email: &NormalizedEmail) -> Self {
        Self {
            subject: email.subject.clone(),
            date: email.date.clone(),
            ..Self::new(provider)
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} from {} ({})",
            self.provider, self.amount_total, self.restaurant, self.order_id
        )
    }
}
