//! Billing demo: issue an invoice, take two payments, print the receipts.

mod config;

use anyhow::Context;
use billing_invoicing::{Invoice, InvoiceLineItem, calculate_invoice_total};
use billing_observability::LogFormat;
use billing_payments::{PaymentMethod, process_payment};
use billing_receipts::{Receipt, generate_receipt};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    let format = std::env::var("BILLING_LOG_FORMAT")
        .ok()
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or_default();
    billing_observability::init_with(format);

    let config = DemoConfig::from_env();
    tracing::info!(tax_rate = %config.tax_rate, invoice_number = %config.invoice_number, "starting billing demo");

    for receipt in run(&config)? {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    }

    Ok(())
}

/// Issue the sample invoice, pay part of it in cash and settle the rest by card.
fn run(config: &DemoConfig) -> anyhow::Result<Vec<Receipt>> {
    let mut items = vec![
        InvoiceLineItem::new("1", "Monthly Fee", Decimal::from(1), Decimal::from(500), config.tax_rate),
        InvoiceLineItem::new("2", "Activity Fee", Decimal::from(2), Decimal::new(2550, 2), config.tax_rate),
    ];

    let totals = calculate_invoice_total(&mut items, config.tax_rate)
        .context("failed to compute invoice totals")?;
    let mut invoice = Invoice::issue("inv-1", config.invoice_number.clone(), Utc::now(), items, &totals);

    let mut receipts = Vec::new();

    let first = process_payment(&mut invoice, Decimal::from(300), PaymentMethod::Cash)
        .context("failed to apply cash payment")?;
    receipts.push(generate_receipt(&first.payment, first.updated_invoice));

    let remainder = invoice.outstanding_amount();
    let second = process_payment(&mut invoice, remainder, PaymentMethod::Card)
        .context("failed to settle invoice by card")?;
    receipts.push(generate_receipt(&second.payment, second.updated_invoice));

    Ok(receipts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn demo_settles_the_invoice() {
        let receipts = run(&DemoConfig::default()).unwrap();

        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].total_paid, dec!(300));
        assert_eq!(receipts[0].remaining_balance, dec!(289.57));
        assert_eq!(receipts[1].total_paid, dec!(289.57));
        assert_eq!(receipts[1].remaining_balance, dec!(0));
        assert_eq!(receipts[1].item_total(), dec!(589.57));
    }

    #[test]
    fn invalid_tax_rate_is_reported() {
        let config = DemoConfig {
            tax_rate: dec!(1.5),
            ..DemoConfig::default()
        };

        let err = run(&config).unwrap_err();

        assert!(err.to_string().contains("failed to compute invoice totals"));
    }
}
