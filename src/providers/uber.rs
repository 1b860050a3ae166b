//! Uber Eats receipts
//!
//! Uber sends single-part HTML receipts, so the body is searched structurally
//! instead of line by line.

use super::{ReceiptExtractor, capture_amount};
use crate::codec::decode_lossy;
use crate::html::{first_matching_cell, unescape};
use crate::types::{NormalizedEmail, Provider, Receipt};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::warn;

static CURRENCY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Sc}(\d+\.\d+)\b").unwrap());

static RESTAURANT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+You ordered from (.*)[\r\n]").unwrap());

/// Reads the rendered HTML body of an Uber Eats receipt
#[derive(Debug, Clone, Copy, Default)]
pub struct UberExtractor;

impl UberExtractor {
    /// Total is the first table cell holding a currency amount
    fn parse_amount(receipt: &mut Receipt, document: &Html) {
        let Some(cell) = first_matching_cell(document, &CURRENCY_REGEX) else {
            warn!(subject = ?receipt.subject, "Unable to find total amount in email");
            return;
        };
        if let Some(amount) = capture_amount(&CURRENCY_REGEX, &cell) {
            receipt.amount_total += amount;
        }
    }

    fn parse_restaurant(receipt: &mut Receipt, body: &str) {
        if let Some(name) = RESTAURANT_REGEX.captures(body).and_then(|c| c.get(1)) {
            receipt.restaurant = unescape(name.as_str()).trim_end().to_string();
        }
    }
}

impl ReceiptExtractor for UberExtractor {
    fn provider(&self) -> Provider {
        Provider::Uber
    }

    fn parse(&self, email: &NormalizedEmail) -> Receipt {
        let mut receipt = Receipt::for_email(Provider::Uber, email);
        let Some(rendered) = email.parts.first().and_then(|p| p.text.as_deref()) else {
            warn!(sender = %email.sender, "Uber receipt has no readable body");
            return receipt;
        };

        let body = match decode_lossy(rendered, &email.transfer_encoding) {
            Ok(decoded) => {
                receipt.line_separator = decoded.line_separator;
                decoded.text
            }
            Err(e) => {
                warn!("Unable to decode Uber receipt body, using it as is: {e}");
                rendered.to_string()
            }
        };

        let document = Html::parse_document(&body);
        Self::parse_amount(&mut receipt, &document);
        Self::parse_restaurant(&mut receipt, &body);

        receipt
    }
}
