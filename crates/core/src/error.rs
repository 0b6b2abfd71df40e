//! Domain error model.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::id::LineItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a synchronous, fail-fast validation failure. Nothing in the
/// domain crates catches or retries these; they go straight back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Totals were requested for an invoice with no line items.
    #[error("invoice must contain at least one item")]
    EmptyItems,

    /// The invoice-level tax rate is outside `[0, 1]`.
    #[error("tax rate must be between 0 and 1")]
    InvalidTaxRate(Decimal),

    /// A line item has a zero or negative quantity.
    #[error("invoice item id {item_id}: quantity must be greater than 0")]
    InvalidQuantity { item_id: LineItemId },

    /// A line item has a negative unit price.
    #[error("invoice item id {item_id}: unit price cannot be negative")]
    InvalidUnitPrice { item_id: LineItemId },

    /// A payment amount is zero or negative.
    #[error("invalid payment amount")]
    InvalidPaymentAmount(Decimal),

    /// A monetary computation exceeded the representable decimal range.
    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_quantity(item_id: &LineItemId) -> Self {
        Self::InvalidQuantity {
            item_id: item_id.clone(),
        }
    }

    pub fn invalid_unit_price(item_id: &LineItemId) -> Self {
        Self::InvalidUnitPrice {
            item_id: item_id.clone(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::AmountOverflow(msg.into())
    }
}
