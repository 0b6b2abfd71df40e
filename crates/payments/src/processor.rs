use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use billing_core::{DomainError, DomainResult, Entity, PaymentId};
use billing_invoicing::Invoice;

use crate::payment::{Payment, PaymentMethod, PaymentStatus};

/// A processed payment together with the invoice it was applied to.
///
/// `updated_invoice` borrows the caller's invoice, so the mutation is visible
/// through either handle.
#[derive(Debug)]
pub struct PaymentResult<'a> {
    pub payment: Payment,
    pub updated_invoice: &'a Invoice,
}

/// Process a payment stamped with the current time.
pub fn process_payment(
    invoice: &mut Invoice,
    amount: Decimal,
    method: PaymentMethod,
) -> DomainResult<PaymentResult<'_>> {
    process_payment_at(invoice, amount, method, Utc::now())
}

/// Process a payment at `paid_at`.
///
/// Rejects non-positive amounts. There is no upper bound: paying past the
/// outstanding balance is valid and leaves the invoice overpaid. Calls are not
/// idempotent; submitting twice records two payments and deducts twice.
pub fn process_payment_at(
    invoice: &mut Invoice,
    amount: Decimal,
    method: PaymentMethod,
    paid_at: DateTime<Utc>,
) -> DomainResult<PaymentResult<'_>> {
    if amount <= Decimal::ZERO {
        tracing::warn!(invoice_id = %invoice.id(), %amount, "rejected payment amount");
        return Err(DomainError::InvalidPaymentAmount(amount));
    }

    let payment = Payment {
        id: PaymentId::new(),
        invoice_id: invoice.id().clone(),
        payment_method: method,
        amount,
        paid_at,
        reference_number: paid_at.timestamp_millis().to_string(),
        status: PaymentStatus::Success,
    };

    let status = invoice.apply_payment(amount).inspect_err(|e| {
        tracing::warn!(invoice_id = %payment.invoice_id, %amount, error = %e, "payment not applied");
    })?;

    tracing::info!(
        payment_id = %payment.id,
        invoice_id = %payment.invoice_id,
        %amount,
        method = ?method,
        outstanding = %invoice.outstanding_amount(),
        status = ?status,
        "payment applied"
    );

    Ok(PaymentResult {
        payment,
        updated_invoice: invoice,
    })
}
