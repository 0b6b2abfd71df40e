//! Receipts domain module.
//!
//! A receipt is a snapshot projected from a completed payment and the invoice
//! state after that payment.

pub mod receipt;

pub use receipt::{Receipt, ReceiptLineItem, generate_receipt, generate_receipt_at};
