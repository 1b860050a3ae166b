//! Provider selection and batch aggregation

use crate::parser::normalize_email;
use crate::types::{NormalizedEmail, Provider, Receipt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Sender substrings checked in priority order
const SENDER_RULES: [(&str, Provider); 3] = [
    ("uber", Provider::Uber),
    ("doordash", Provider::DoorDash),
    ("deliveroo", Provider::Deliveroo),
];

/// Pick the provider whose name appears in the sender address
#[must_use]
pub fn select_provider(sender: &str) -> Option<Provider> {
    SENDER_RULES
        .iter()
        .find(|(needle, _)| sender.contains(needle))
        .map(|&(_, provider)| provider)
}

/// Extract a receipt from an email, or `None` for an unknown sender
#[must_use]
pub fn dispatch(email: &NormalizedEmail) -> Option<Receipt> {
    let Some(provider) = select_provider(&email.sender) else {
        info!(sender = %email.sender, "Unknown delivery service found");
        return None;
    };
    Some(provider.extractor().parse(email))
}

/// Result of processing one archived record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MessageOutcome {
    /// A receipt was extracted and its amount counted
    Receipt(Receipt),

    /// The sender is not a known delivery service
    Skipped { sender: String },

    /// The record is not a usable mail message
    Rejected { index: usize, reason: String },
}

/// Grand total and per-record outcomes of a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Sum of every extracted receipt amount
    pub total: Decimal,

    /// One outcome per input record, in input order
    pub outcomes: Vec<MessageOutcome>,
}

impl BatchSummary {
    /// Receipts that contributed to the total
    pub fn receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.outcomes.iter().filter_map(|o| match o {
            MessageOutcome::Receipt(receipt) => Some(receipt),
            _ => None,
        })
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MessageOutcome::Skipped { .. }))
            .count()
    }

    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MessageOutcome::Rejected { .. }))
            .count()
    }
}

/// Sequential accumulator folding receipts into a running total
#[derive(Debug, Default)]
pub struct ReceiptBatch {
    summary: BatchSummary,
}

impl ReceiptBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Running total so far
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.summary.total
    }

    /// Dispatch an email and fold its amount into the total
    pub fn fold_email(&mut self, email: &NormalizedEmail) -> &MessageOutcome {
        let outcome = match dispatch(email) {
            Some(receipt) => {
                self.summary.total += receipt.amount_total;
                info!(
                    "Adding {} to total {} from {} ({})",
                    receipt.amount_total, self.summary.total, receipt.restaurant, receipt.order_id
                );
                MessageOutcome::Receipt(receipt)
            }
            None => MessageOutcome::Skipped {
                sender: email.sender.clone(),
            },
        };
        self.push(outcome)
    }

    /// Normalize a raw record and fold it; invalid records are rejected
    pub fn fold_record(&mut self, raw: &[u8]) -> &MessageOutcome {
        let index = self.summary.outcomes.len();
        match normalize_email(raw) {
            Ok(email) => self.fold_email(&email),
            Err(e) => {
                warn!(index, "Rejecting record: {e}");
                self.push(MessageOutcome::Rejected {
                    index,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn push(&mut self, outcome: MessageOutcome) -> &MessageOutcome {
        self.summary.outcomes.push(outcome);
        &self.summary.outcomes[self.summary.outcomes.len() - 1]
    }

    #[must_use]
    pub fn finish(self) -> BatchSummary {
        self.summary
    }
}

/// Process raw records in order and return the grand total with every outcome
pub fn process_batch<I, R>(records: I) -> BatchSummary
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut batch = ReceiptBatch::new();

    for (index, record) in records.into_iter().enumerate() {
        info!("Parsing record {}", index + 1);
        batch.fold_record(record.as_ref());
    }

    batch.finish()
}
