//! Invoice totals: subtotal, tax and grand total over a set of line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult, ValueObject, round2};

use crate::invoice::InvoiceLineItem;

/// Computed totals, each rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl ValueObject for InvoiceTotals {}

/// Compute totals for `items` at the invoice-level `tax_rate`.
///
/// Validation runs in order and the first failure wins: empty items, then the
/// tax rate, then each item's quantity and unit price in sequence. Every item is
/// validated before any is touched, so on error the items are left unchanged.
///
/// Amounts beyond the decimal range fail with `AmountOverflow`, also before any
/// item is written.
///
/// On success each item's `line_total` and `tax_amount` are overwritten. Amounts
/// are accumulated unrounded; the three outputs are rounded independently at the
/// end, with `total` taken from the unrounded `subtotal + tax`.
pub fn calculate_invoice_total(
    items: &mut [InvoiceLineItem],
    tax_rate: Decimal,
) -> DomainResult<InvoiceTotals> {
    if items.is_empty() {
        tracing::warn!("rejected totals request without line items");
        return Err(DomainError::EmptyItems);
    }
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        tracing::warn!(%tax_rate, "rejected tax rate outside [0, 1]");
        return Err(DomainError::InvalidTaxRate(tax_rate));
    }

    for item in items.iter() {
        validate_line(item).inspect_err(|e| {
            tracing::warn!(item_id = %item.id, error = %e, "rejected invoice line item");
        })?;
    }

    let mut subtotal = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut computed = Vec::with_capacity(items.len());

    for item in items.iter() {
        let line_total = item
            .quantity
            .checked_mul(item.unit_price)
            .ok_or_else(|| line_overflow(item, "line total"))?;
        let tax_amount = line_total
            .checked_mul(tax_rate)
            .ok_or_else(|| line_overflow(item, "tax amount"))?;

        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| DomainError::overflow("invoice subtotal"))?;
        tax = tax
            .checked_add(tax_amount)
            .ok_or_else(|| DomainError::overflow("invoice tax"))?;

        computed.push((line_total, tax_amount));
    }

    let total = subtotal
        .checked_add(tax)
        .ok_or_else(|| DomainError::overflow("invoice total"))?;

    for (item, (line_total, tax_amount)) in items.iter_mut().zip(computed) {
        item.set_computed(line_total, tax_amount);
    }

    let totals = InvoiceTotals {
        subtotal: round2(subtotal),
        tax: round2(tax),
        total: round2(total),
    };

    tracing::debug!(
        items = items.len(),
        subtotal = %totals.subtotal,
        tax = %totals.tax,
        total = %totals.total,
        "computed invoice totals"
    );

    Ok(totals)
}

fn validate_line(item: &InvoiceLineItem) -> DomainResult<()> {
    if item.quantity <= Decimal::ZERO {
        return Err(DomainError::invalid_quantity(&item.id));
    }
    if item.unit_price < Decimal::ZERO {
        return Err(DomainError::invalid_unit_price(&item.id));
    }
    Ok(())
}

fn line_overflow(item: &InvoiceLineItem, what: &str) -> DomainError {
    DomainError::overflow(format!("invoice item id {}: {what}", item.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::LineItemId;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(id: &str, quantity: Decimal, unit_price: Decimal) -> InvoiceLineItem {
        InvoiceLineItem::new(id, format!("Item {id}"), quantity, unit_price, dec!(0.07))
    }

    #[test]
    fn basic_invoice_calculation() {
        let mut items = vec![item("1", dec!(1), dec!(500)), item("2", dec!(2), dec!(25.5))];

        let totals = calculate_invoice_total(&mut items, dec!(0.07)).unwrap();

        assert_eq!(totals.subtotal, dec!(551.00));
        assert_eq!(totals.tax, dec!(38.57));
        assert_eq!(totals.total, dec!(589.57));
    }

    #[test]
    fn tax_is_rounded_from_the_unrounded_sum() {
        let mut items = vec![item("1", dec!(3), dec!(33.33))];

        let totals = calculate_invoice_total(&mut items, dec!(0.07)).unwrap();

        assert_eq!(totals.subtotal, dec!(99.99));
        assert_eq!(totals.tax, dec!(7.00));
        assert_eq!(totals.total, dec!(106.99));
        // Per-line amounts stay unrounded.
        assert_eq!(items[0].tax_amount(), dec!(6.9993));
    }

    #[test]
    fn multiple_items_of_different_quantities() {
        let mut items = vec![item("1", dec!(5), dec!(10.5)), item("2", dec!(3), dec!(20.75))];

        let totals = calculate_invoice_total(&mut items, dec!(0.1)).unwrap();

        assert_eq!(totals.subtotal, dec!(114.75));
        assert_eq!(totals.tax, dec!(11.48));
        assert_eq!(totals.total, dec!(126.23));
    }

    #[test]
    fn zero_and_full_tax_rates_are_accepted() {
        let mut items = vec![item("1", dec!(1), dec!(100))];

        let totals = calculate_invoice_total(&mut items, dec!(0)).unwrap();
        assert_eq!((totals.subtotal, totals.tax, totals.total), (dec!(100), dec!(0), dec!(100)));

        let totals = calculate_invoice_total(&mut items, dec!(1.0)).unwrap();
        assert_eq!((totals.subtotal, totals.tax, totals.total), (dec!(100), dec!(100), dec!(200)));
    }

    #[test]
    fn very_large_amounts_keep_cent_precision() {
        let mut items = vec![
            item("1", dec!(1), dec!(999999.99)),
            item("2", dec!(5), dec!(500000.5)),
        ];

        let totals = calculate_invoice_total(&mut items, dec!(0.07)).unwrap();

        assert_eq!(totals.subtotal, dec!(3500002.49));
        assert_eq!(totals.tax, dec!(245000.17));
        assert_eq!(totals.total, dec!(3745002.66));
    }

    #[test]
    fn back_fills_line_amounts_using_invoice_rate() {
        let mut items = vec![InvoiceLineItem::new("1", "Service", dec!(2), dec!(50), dec!(0.5))];

        calculate_invoice_total(&mut items, dec!(0.1)).unwrap();

        assert_eq!(items[0].line_total(), dec!(100));
        assert_eq!(items[0].tax_amount(), dec!(10));
        assert_eq!(items[0].gross_amount(), dec!(110));
        assert_eq!(items[0].tax_rate, dec!(0.5));
    }

    #[test]
    fn empty_items_fail_for_any_rate() {
        for rate in [dec!(0.1), dec!(5), dec!(-1)] {
            assert_eq!(calculate_invoice_total(&mut Vec::new(), rate), Err(DomainError::EmptyItems));
        }
    }

    #[test]
    fn tax_rate_outside_unit_interval_fails() {
        let mut items = vec![item("1", dec!(1), dec!(100))];

        for rate in [dec!(1.5), dec!(-0.1)] {
            assert_eq!(
                calculate_invoice_total(&mut items, rate),
                Err(DomainError::InvalidTaxRate(rate))
            );
        }
    }

    #[test]
    fn non_positive_quantity_names_the_item() {
        for quantity in [dec!(0), dec!(-2)] {
            let mut items = vec![item("1", quantity, dec!(100))];
            let err = calculate_invoice_total(&mut items, dec!(0.1)).unwrap_err();
            assert_eq!(err, DomainError::InvalidQuantity { item_id: LineItemId::from("1") });
            assert_eq!(err.to_string(), "invoice item id 1: quantity must be greater than 0");
        }
    }

    #[test]
    fn negative_unit_price_names_the_item() {
        let mut items = vec![item("1", dec!(1), dec!(-100))];

        let err = calculate_invoice_total(&mut items, dec!(0.1)).unwrap_err();

        assert_eq!(err, DomainError::InvalidUnitPrice { item_id: LineItemId::from("1") });
        assert_eq!(err.to_string(), "invoice item id 1: unit price cannot be negative");
    }

    #[test]
    fn first_offending_item_wins_and_nothing_is_mutated() {
        let mut items = vec![
            item("ok", dec!(2), dec!(10)),
            item("bad-price", dec!(1), dec!(-1)),
            item("bad-qty", dec!(0), dec!(10)),
        ];

        let err = calculate_invoice_total(&mut items, dec!(0.1)).unwrap_err();

        assert_eq!(err, DomainError::invalid_unit_price(&LineItemId::from("bad-price")));
        assert_eq!(items[0].line_total(), Decimal::ZERO);
        assert_eq!(items[0].tax_amount(), Decimal::ZERO);
    }

    #[test]
    fn quantity_check_precedes_price_check_within_an_item() {
        let mut items = vec![item("1", dec!(0), dec!(-1))];

        let err = calculate_invoice_total(&mut items, dec!(0.1)).unwrap_err();

        assert_eq!(err, DomainError::invalid_quantity(&LineItemId::from("1")));
    }

    #[test]
    fn line_total_overflow_is_an_error_and_nothing_is_mutated() {
        let huge = Decimal::from(1_000_000_000_000_000i64);
        let mut items = vec![item("ok", dec!(2), dec!(10)), item("huge", huge, huge)];

        let err = calculate_invoice_total(&mut items, dec!(0.1)).unwrap_err();

        assert_eq!(err, DomainError::overflow("invoice item id huge: line total"));
        assert_eq!(items[0].line_total(), Decimal::ZERO);
        assert_eq!(items[1].line_total(), Decimal::ZERO);
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let mut items = vec![
            item("1", dec!(1), Decimal::MAX),
            item("2", dec!(1), Decimal::MAX),
        ];

        let err = calculate_invoice_total(&mut items, dec!(0)).unwrap_err();

        assert_eq!(err, DomainError::overflow("invoice subtotal"));
        assert_eq!(items[0].line_total(), Decimal::ZERO);
    }

    #[test]
    fn empty_check_precedes_rate_check() {
        assert_eq!(calculate_invoice_total(&mut Vec::new(), dec!(2)), Err(DomainError::EmptyItems));
    }

    #[test]
    fn rate_check_precedes_item_checks() {
        let mut items = vec![item("1", dec!(0), dec!(-1))];
        assert_eq!(
            calculate_invoice_total(&mut items, dec!(2)),
            Err(DomainError::InvalidTaxRate(dec!(2)))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: outputs are independently rounded to cents and the total
        /// never drifts more than a cent from subtotal + tax.
        #[test]
        fn totals_are_rounded_and_consistent(
            lines in prop::collection::vec((1i64..1_000i64, 0i64..10_000_000i64), 1..10),
            rate_bp in 0u32..=10_000u32,
        ) {
            let tax_rate = Decimal::from(rate_bp) / dec!(10000);
            let mut items: Vec<InvoiceLineItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (qty, cents))| {
                    item(&i.to_string(), Decimal::from(*qty), Decimal::new(*cents, 2))
                })
                .collect();

            let totals = calculate_invoice_total(&mut items, tax_rate).unwrap();

            let raw_subtotal: Decimal = items.iter().map(|i| i.line_total()).sum();
            let raw_tax: Decimal = items.iter().map(|i| i.tax_amount()).sum();

            prop_assert_eq!(totals.subtotal, round2(raw_subtotal));
            prop_assert_eq!(totals.tax, round2(raw_tax));
            prop_assert_eq!(totals.total, round2(raw_subtotal + raw_tax));
            prop_assert!((totals.total - (totals.subtotal + totals.tax)).abs() <= dec!(0.01));
            prop_assert!(totals.subtotal.scale() <= 2);
            prop_assert!(totals.tax.scale() <= 2);
            prop_assert!(totals.total.scale() <= 2);
        }
    }
}
