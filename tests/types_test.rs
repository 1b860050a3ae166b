use rust_decimal::Decimal;
use takeout_calc::*;

// --- Provider ---

#[test]
fn test_provider_display() {
    assert_eq!(Provider::Uber.to_string(), "Uber Eats");
    assert_eq!(Provider::DoorDash.to_string(), "DoorDash");
    assert_eq!(Provider::Deliveroo.to_string(), "Deliveroo");
}

// --- LineSeparator ---

#[test]
fn test_line_separator_default() {
    assert_eq!(LineSeparator::default(), LineSeparator::Lf);
}

#[test]
fn test_line_separator_as_str() {
    assert_eq!(LineSeparator::Lf.as_str(), "\n");
    assert_eq!(LineSeparator::CrLf.as_str(), "\r\n");
}

// --- Receipt ---

#[test]
fn test_receipt_defaults() {
    let receipt = Receipt::new(Provider::Deliveroo);

    assert_eq!(receipt.order_id, "Unknown");
    assert_eq!(receipt.restaurant, "Unknown");
    assert_eq!(receipt.amount_total, Decimal::ZERO);
    assert!(receipt.url.is_none());
    assert_eq!(receipt.line_separator, LineSeparator::Lf);
}

#[test]
fn test_receipt_for_email_copies_metadata() {
    let email = NormalizedEmail {
        sender: "orders@uber.com".into(),
        receiver: Some("me@example.com".into()),
        subject: Some("Your order".into()),
        labels: None,
        date: Some("Thu, 01 Jan 2025 12:00:00 +0000".into()),
        transfer_encoding: NOT_AVAILABLE.into(),
        parts: Vec::new(),
    };
    let receipt = Receipt::for_email(Provider::Uber, &email);

    assert_eq!(receipt.subject.as_deref(), Some("Your order"));
    assert_eq!(
        receipt.date.as_deref(),
        Some("Thu, 01 Jan 2025 12:00:00 +0000")
    );
    assert_eq!(receipt.order_id, UNKNOWN);
}

#[test]
fn test_receipt_display() {
    let mut receipt = Receipt::new(Provider::DoorDash);
    receipt.amount_total = Decimal::new(2345, 2);
    receipt.restaurant = "Taco Place".into();

    assert_eq!(receipt.to_string(), "DoorDash 23.45 from Taco Place (Unknown)");
}

// --- NormalizedEmail ---

#[test]
fn test_first_plain_text_skips_empty_parts() {
    let part = |content_type: &str, text: Option<&str>| MessagePart {
        content_type: content_type.into(),
        transfer_encoding: NOT_AVAILABLE.into(),
        text: text.map(Into::into),
    };
    let email = NormalizedEmail {
        sender: "hello@deliveroo.co.uk".into(),
        receiver: None,
        subject: None,
        labels: None,
        date: None,
        transfer_encoding: NOT_AVAILABLE.into(),
        parts: vec![
            part("text/html", Some("<p>html</p>")),
            part("text/plain", None),
            part("text/plain", Some("second plain")),
            part("text/plain", Some("third plain")),
        ],
    };

    let plain = email.first_plain_text().unwrap();
    assert_eq!(plain.text.as_deref(), Some("second plain"));
}
