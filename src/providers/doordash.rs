//! DoorDash receipts

use super::{ReceiptExtractor, capture_amount, plain_text_body};
use crate::types::{NormalizedEmail, Provider, Receipt};
use regex::Regex;
use std::sync::LazyLock;

static TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Total Charged \p{Sc}(\d+\.\d+)\b").unwrap());

static ORDER_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(https://www\.doordash\.com/orders/(\w{8}-\w{4}-\w{4}-\w{4}-\w{12}))/>").unwrap()
});

/// Reads the plain-text alternative of a DoorDash receipt line by line
#[derive(Debug, Clone, Copy, Default)]
pub struct DoorDashExtractor;

impl DoorDashExtractor {
    fn parse_amount(receipt: &mut Receipt, line: &str) {
        if let Some(amount) = capture_amount(&TOTAL_REGEX, line) {
            receipt.amount_total += amount;
        }
    }

    fn parse_order_id(receipt: &mut Receipt, line: &str) {
        if receipt.url.is_some() {
            return;
        }
        if let Some(caps) = ORDER_URL_REGEX.captures(line)
            && let (Some(url), Some(id)) = (caps.get(1), caps.get(2))
        {
            receipt.url = Some(url.as_str().to_string());
            receipt.order_id = id.as_str().to_string();
        }
    }
}

impl ReceiptExtractor for DoorDashExtractor {
    fn provider(&self) -> Provider {
        Provider::DoorDash
    }

    fn parse(&self, email: &NormalizedEmail) -> Receipt {
        let mut receipt = Receipt::for_email(Provider::DoorDash, email);
        let Some(body) = plain_text_body(email, Provider::DoorDash) else {
            return receipt;
        };
        receipt.line_separator = body.line_separator;

        for line in body.lines() {
            Self::parse_amount(&mut receipt, line);
            Self::parse_order_id(&mut receipt, line);
        }

        receipt
    }
}
