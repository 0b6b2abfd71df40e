//! Payments domain module.
//!
//! Validates a payment, records it, and applies it to an invoice's outstanding
//! balance. Callers must serialise payments per invoice; nothing here locks.

pub mod payment;
pub mod processor;

pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use processor::{PaymentResult, process_payment, process_payment_at};
