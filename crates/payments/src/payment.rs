use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::{Entity, InvoiceId, PaymentId};

/// How the payer settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Card,
}

/// Outcome of a payment.
///
/// Only `Success` is produced today; `Failed` is reserved for gateways that can
/// decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// A recorded payment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    /// Unix milliseconds of `paid_at`.
    pub reference_number: String,
    pub status: PaymentStatus,
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
