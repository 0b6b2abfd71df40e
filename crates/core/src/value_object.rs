//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `InvoiceTotals` is the canonical example here: two totals with the same
/// subtotal, tax and total are the same totals, whichever invoice produced them.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Amounts { subtotal: Decimal, tax: Decimal }
///
/// impl ValueObject for Amounts {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
