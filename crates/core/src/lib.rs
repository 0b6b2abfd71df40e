//! `billing-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the invoicing,
//! payments and receipts crates (no IO, no clocks, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, LineItemId, PaymentId, ReceiptId};
pub use money::round2;
pub use value_object::ValueObject;
