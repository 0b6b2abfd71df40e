//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Invoices keep their identity while payments mutate their balance; payments
/// and receipts are identified records that never change once created.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
