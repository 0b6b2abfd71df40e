//! Demo configuration, read from the environment.

use rust_decimal::Decimal;

/// 7%
const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);
const DEFAULT_INVOICE_NUMBER: &str = "INV-001";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// `BILLING_TAX_RATE`, invoice-level rate applied to every line.
    pub tax_rate: Decimal,
    /// `BILLING_INVOICE_NUMBER`.
    pub invoice_number: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            invoice_number: DEFAULT_INVOICE_NUMBER.to_string(),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or malformed values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("BILLING_TAX_RATE") {
            match raw.trim().parse::<Decimal>() {
                Ok(rate) => config.tax_rate = rate,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "BILLING_TAX_RATE is not a decimal; using default {DEFAULT_TAX_RATE}");
                }
            }
        }

        if let Some(number) = lookup("BILLING_INVOICE_NUMBER").filter(|n| !n.trim().is_empty()) {
            config.invoice_number = number;
        }

        config
    }
}
