use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::{Entity, LineItemId, PaymentId, ReceiptId};
use billing_invoicing::{Invoice, InvoiceLineItem};
use billing_payments::Payment;

/// One line on a receipt: the gross amount (line total + tax) of an invoice item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    pub id: LineItemId,
    pub description: String,
    pub amount: Decimal,
}

impl From<&InvoiceLineItem> for ReceiptLineItem {
    fn from(item: &InvoiceLineItem) -> Self {
        Self {
            id: item.id.clone(),
            description: item.description.clone(),
            amount: item.gross_amount(),
        }
    }
}

/// Receipt for a single payment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub payment_id: PaymentId,
    /// Unix milliseconds of `issued_at`.
    pub receipt_number: String,
    pub issued_at: DateTime<Utc>,
    pub total_paid: Decimal,
    pub remaining_balance: Decimal,
    pub items: Vec<ReceiptLineItem>,
}

impl Receipt {
    /// Sum of the itemised amounts (the invoice's gross, not what was paid).
    pub fn item_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }
}

impl Entity for Receipt {
    type Id = ReceiptId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Generate a receipt stamped with the current time.
pub fn generate_receipt(payment: &Payment, invoice: &Invoice) -> Receipt {
    generate_receipt_at(payment, invoice, Utc::now())
}

/// Generate a receipt at `issued_at`.
///
/// Assumes `payment` has already been applied to `invoice`: the remaining
/// balance is whatever the invoice reports now. The payment's invoice id is not
/// checked against `invoice`. Items always carry full per-item gross amounts,
/// even for a partial payment.
pub fn generate_receipt_at(
    payment: &Payment,
    invoice: &Invoice,
    issued_at: DateTime<Utc>,
) -> Receipt {
    let receipt = Receipt {
        id: ReceiptId::new(),
        payment_id: payment.id,
        receipt_number: issued_at.timestamp_millis().to_string(),
        issued_at,
        total_paid: payment.amount,
        remaining_balance: invoice.outstanding_amount(),
        items: invoice.items().iter().map(ReceiptLineItem::from).collect(),
    };

    tracing::debug!(
        receipt_id = %receipt.id,
        payment_id = %receipt.payment_id,
        invoice_id = %invoice.id(),
        total_paid = %receipt.total_paid,
        remaining_balance = %receipt.remaining_balance,
        "generated receipt"
    );

    receipt
}
