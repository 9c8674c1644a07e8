//! Ticket (completed sale) and its line items

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed point-of-sale transaction
///
/// Immutable once created. `total_amount` is authoritative and is never
/// reconciled against the sum of the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    /// Human-facing sequential display number
    pub correlative_number: i64,
    /// Creation time in the store's local time
    #[serde(
        rename = "created_at_local",
        alias = "created_at",
        with = "crate::time::local_timestamp"
    )]
    pub created_at: NaiveDateTime,
    /// Cashier
    pub username: String,
    pub location_name: String,
    /// Open categorical value (cash, card, ...)
    pub payment_type: String,
    pub total_amount: Decimal,
}

impl Ticket {
    /// Display label (`#<correlative_number>`)
    pub fn display_number(&self) -> String {
        format!("#{}", self.correlative_number)
    }
}

/// One line of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl LineItem {
    /// `quantity × unit_price`, always recomputed
    ///
    /// Returns `None` if the product overflows the decimal range.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}
