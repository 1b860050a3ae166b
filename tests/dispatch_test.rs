use rust_decimal::Decimal;
use std::str::FromStr;
use takeout_calc::*;

const UBER: &[u8] = b"From: Uber Receipts <orders@uber.com>\n\
Subject: Your order\n\
Content-Type: text/html\n\
\n\
<table><tr><td>Total</td></tr><tr><td>$15.20</td></tr></table>\n";

const DOORDASH: &[u8] = b"From: DoorDash <no-reply@doordash.com>\n\
Subject: Order Confirmation\n\
Content-Type: multipart/alternative; boundary=\"b\"\n\
\n\
--b\n\
Content-Type: text/plain\n\
\n\
Total Charged $23.45\n\
<https://www.doordash.com/orders/11111111-2222-3333-4444-555555555555/>\n\
--b--\n";

const UNKNOWN_SENDER: &[u8] = b"From: someone@example.com\n\
Subject: Lunch?\n\
\n\
Total Charged $100.00\n";

const NO_SENDER: &[u8] = b"Subject: Orphan\n\nTotal Charged $7.00\n";

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

#[test]
fn test_select_provider() {
    assert_eq!(select_provider("orders@uber.com"), Some(Provider::Uber));
    assert_eq!(
        select_provider("no-reply@doordash.com"),
        Some(Provider::DoorDash)
    );
    assert_eq!(
        select_provider("hello@deliveroo.co.uk"),
        Some(Provider::Deliveroo)
    );
    assert_eq!(select_provider("someone@example.com"), None);
}

#[test]
fn test_select_provider_priority() {
    assert_eq!(
        select_provider("uber-fan@deliveroo.co.uk"),
        Some(Provider::Uber)
    );
}

#[test]
fn test_dispatch_unknown_sender() {
    let email = normalize_email(UNKNOWN_SENDER).unwrap();
    assert!(dispatch(&email).is_none());
}

#[test]
fn test_dispatch_runs_provider_rules() {
    let email = normalize_email(DOORDASH).unwrap();
    let receipt = dispatch(&email).unwrap();

    assert_eq!(receipt.provider, Provider::DoorDash);
    assert_eq!(receipt.amount_total, dec("23.45"));
}

#[test]
fn test_batch_total_ignores_unknown_senders() {
    let summary = process_batch([UBER, DOORDASH, UNKNOWN_SENDER]);

    assert_eq!(summary.total, dec("38.65"));
    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.receipts().count(), 2);
    assert_eq!(summary.skipped_count(), 1);
    assert_eq!(summary.rejected_count(), 0);
    assert!(matches!(
        &summary.outcomes[2],
        MessageOutcome::Skipped { sender } if sender == "someone@example.com"
    ));
}

#[test]
fn test_batch_continues_past_rejected_record() {
    let summary = process_batch([NO_SENDER, DOORDASH]);

    assert_eq!(summary.total, dec("23.45"));
    assert_eq!(summary.rejected_count(), 1);
    assert!(matches!(
        &summary.outcomes[0],
        MessageOutcome::Rejected { index: 0, reason } if reason.contains("From")
    ));
}

#[test]
fn test_receipt_batch_running_total() {
    let mut batch = ReceiptBatch::new();
    assert_eq!(batch.total(), Decimal::ZERO);

    let outcome = batch.fold_record(DOORDASH);
    assert!(matches!(outcome, MessageOutcome::Receipt(_)));
    assert_eq!(batch.total(), dec("23.45"));

    batch.fold_record(UBER);
    assert_eq!(batch.total(), dec("38.65"));

    let summary = batch.finish();
    assert_eq!(summary.receipts().count(), 2);
}

#[test]
fn test_empty_batch() {
    let summary = process_batch(Vec::<Vec<u8>>::new());

    assert_eq!(summary.total, Decimal::ZERO);
    assert!(summary.outcomes.is_empty());
}

#[test]
fn test_summary_serializes() {
    let summary = process_batch([DOORDASH, UNKNOWN_SENDER]);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["total"], "23.45");
    assert_eq!(json["outcomes"][0]["status"], "receipt");
    assert_eq!(json["outcomes"][0]["provider"], "DoorDash");
    assert_eq!(
        json["outcomes"][0]["order_id"],
        "11111111-2222-3333-4444-555555555555"
    );
    assert_eq!(json["outcomes"][1]["status"], "skipped");
}
