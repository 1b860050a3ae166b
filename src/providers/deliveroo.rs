//! Deliveroo receipts

use super::{ReceiptExtractor, capture_amount, plain_text_body};
use crate::types::{NormalizedEmail, Provider, Receipt};
use regex::Regex;
use std::sync::LazyLock;

// Exactly two spaces of indentation: subtotal lines are indented differently.
static TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{2}Total\s+\p{Sc}(\d+\.\d+)$").unwrap());

static ORDER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Your Receipt for Order #(\d+)\b").unwrap());

static RESTAURANT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)( has your order!)$").unwrap());

/// Reads the plain-text alternative of a Deliveroo receipt line by line
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliverooExtractor;

impl DeliverooExtractor {
    fn parse_amount(receipt: &mut Receipt, line: &str) {
        if let Some(amount) = capture_amount(&TOTAL_REGEX, line) {
            receipt.amount_total += amount;
        }
    }

    fn parse_restaurant(receipt: &mut Receipt, line: &str) {
        if let Some(name) = RESTAURANT_REGEX.captures(line).and_then(|c| c.get(1)) {
            receipt.restaurant = name.as_str().to_string();
        }
    }

    /// Order numbers stay strings: leading zeros are significant
    fn parse_order_id(receipt: &mut Receipt, line: &str) {
        if let Some(id) = ORDER_ID_REGEX.captures(line).and_then(|c| c.get(1)) {
            receipt.order_id = id.as_str().to_string();
        }
    }
}

impl ReceiptExtractor for DeliverooExtractor {
    fn provider(&self) -> Provider {
        Provider::Deliveroo
    }

    fn parse(&self, email: &NormalizedEmail) -> Receipt {
        let mut receipt = Receipt::for_email(Provider::Deliveroo, email);
        let Some(body) = plain_text_body(email, Provider::Deliveroo) else {
            return receipt;
        };
        receipt.line_separator = body.line_separator;

        for line in body.lines() {
            Self::parse_amount(&mut receipt, line);
            Self::parse_restaurant(&mut receipt, line);
            Self::parse_order_id(&mut receipt, line);
        }

        receipt
    }
}
