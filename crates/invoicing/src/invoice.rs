use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult, Entity, InvoiceId, LineItemId, round2};

use crate::totals::InvoiceTotals;

/// Invoice status, derived from the outstanding amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overpaid,
}

impl InvoiceStatus {
    /// Exactly zero is paid, below zero is overpaid, anything else is still pending.
    pub fn from_outstanding(outstanding: Decimal) -> Self {
        if outstanding.is_zero() {
            InvoiceStatus::Paid
        } else if outstanding.is_sign_negative() {
            InvoiceStatus::Overpaid
        } else {
            InvoiceStatus::Pending
        }
    }
}

/// A billable line on an invoice.
///
/// `line_total` and `tax_amount` are computed, not input: they start at zero and
/// are written by [`calculate_invoice_total`](crate::calculate_invoice_total).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Stored with the line but not used in computation; the invoice-level
    /// rate passed to the calculator applies to every line.
    pub tax_rate: Decimal,
    #[serde(default)]
    line_total: Decimal,
    #[serde(default)]
    tax_amount: Decimal,
}

impl InvoiceLineItem {
    pub fn new(
        id: impl Into<LineItemId>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            quantity,
            unit_price,
            tax_rate,
            line_total: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
        }
    }

    /// quantity × unit price, as last computed (unrounded).
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }

    /// line total × invoice tax rate, as last computed (unrounded).
    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    /// Line total plus tax.
    pub fn gross_amount(&self) -> Decimal {
        self.line_total + self.tax_amount
    }

    pub(crate) fn set_computed(&mut self, line_total: Decimal, tax_amount: Decimal) {
        self.line_total = line_total;
        self.tax_amount = tax_amount;
    }
}

/// Invoice record.
///
/// The outstanding amount starts at the total and only ever decreases, one
/// payment at a time, through [`Invoice::apply_payment`]. It may go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    invoice_number: String,
    issued_at: DateTime<Utc>,
    items: Vec<InvoiceLineItem>,
    total_amount: Decimal,
    total_tax: Decimal,
    outstanding_amount: Decimal,
    status: InvoiceStatus,
}

impl Invoice {
    /// Issue an invoice from computed totals.
    pub fn issue(
        id: impl Into<InvoiceId>,
        invoice_number: impl Into<String>,
        issued_at: DateTime<Utc>,
        items: Vec<InvoiceLineItem>,
        totals: &InvoiceTotals,
    ) -> Self {
        Self::with_amounts(id, invoice_number, issued_at, items, totals.total, totals.tax)
    }

    /// Issue an invoice with explicit amounts; the outstanding amount starts at `total_amount`.
    pub fn with_amounts(
        id: impl Into<InvoiceId>,
        invoice_number: impl Into<String>,
        issued_at: DateTime<Utc>,
        items: Vec<InvoiceLineItem>,
        total_amount: Decimal,
        total_tax: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            invoice_number: invoice_number.into(),
            issued_at,
            items,
            total_amount,
            total_tax,
            outstanding_amount: total_amount,
            status: InvoiceStatus::from_outstanding(total_amount),
        }
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn items(&self) -> &[InvoiceLineItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }

    pub fn outstanding_amount(&self) -> Decimal {
        self.outstanding_amount
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Deduct a payment from the outstanding amount and re-derive the status.
    ///
    /// Rejects zero and negative amounts, and balances that would leave the
    /// decimal range, without touching the invoice.
    pub fn apply_payment(&mut self, amount: Decimal) -> DomainResult<InvoiceStatus> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidPaymentAmount(amount));
        }

        let outstanding = self
            .outstanding_amount
            .checked_sub(amount)
            .ok_or_else(|| DomainError::overflow("invoice outstanding amount"))?;

        self.outstanding_amount = round2(outstanding);
        self.status = InvoiceStatus::from_outstanding(self.outstanding_amount);
        Ok(self.status)
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
