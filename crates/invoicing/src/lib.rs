//! Invoicing domain module.
//!
//! Line items, invoice totals and the invoice record itself, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod invoice;
pub mod totals;

pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus};
pub use totals::{InvoiceTotals, calculate_invoice_total};
