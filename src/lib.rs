// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Food-delivery receipt extraction
//!
//! Turns archived receipt emails from Uber Eats, DoorDash and Deliveroo into
//! structured receipts and sums their totals.
//!
//! # Pipeline
//!
//! - [`normalize_email`] flattens the MIME tree into ordered text parts
//! - [`select_provider`] picks the extractor from the sender address
//! - [`ReceiptExtractor::parse`] applies the provider's rules
//! - [`process_batch`] folds every receipt amount into a grand total
//!
//! # Example
//!
//! ```rust
//! use takeout_calc::process_batch;
//!
//! let raw = b"From: DoorDash <no-reply@doordash.com>\n\
//!             Subject: Your receipt\n\
//!             Content-Type: multipart/alternative; boundary=\"b\"\n\
//!             \n\
//!             --b\n\
//!             Content-Type: text/plain\n\
//!             \n\
//!             Total Charged $12.50\n\
//!             --b--\n";
//!
//! let summary = process_batch([&raw[..]]);
//! println!("Sum: {}", summary.total);
//! ```

pub mod codec;
mod dispatch;
mod error;
pub mod html;
pub mod mbox;
mod parser;
mod providers;
mod types;

pub use dispatch::{
    BatchSummary, MessageOutcome, ReceiptBatch, dispatch, process_batch, select_provider,
};
pub use error::{ParseError, Result};
pub use parser::{flatten_parts, normalize_email};
pub use providers::{DeliverooExtractor, DoorDashExtractor, ReceiptExtractor, UberExtractor};
pub use types::*;
