//! Line items and amount formatting.

use serde::{Deserialize, Serialize};

/// A single purchased good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name shown to the buyer.
    pub name: String,
    /// Unit price.
    pub amount: f64,
    /// Number of units.
    pub quantity: i16,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(name: impl Into<String>, amount: f64, quantity: i16) -> Self {
        Self {
            name: name.into(),
            amount,
            quantity,
        }
    }

    /// Returns `amount * quantity`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.amount * f64::from(self.quantity)
    }
}

/// Sums `amount * quantity` over all items.
///
/// Computed in floating point without rounding between terms; rounding only
/// happens when the total is put on the wire with [`format_amount`].
#[must_use]
pub fn sum_amounts(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::total).sum()
}

/// Formats a currency amount with exactly two decimal digits.
///
/// ```rust
/// assert_eq!(nvpay::item::format_amount(1.0), "1.00");
/// assert_eq!(nvpay::item::format_amount(9.5), "9.50");
/// ```
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
