//! Money rounding and display
//!
//! Every amount shown to an operator (receipt cells, totals, CLI tables)
//! goes through these helpers so a value is rounded the same way wherever
//! it appears: two decimal places, half-up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default currency prefix
pub const DEFAULT_CURRENCY: &str = "$";

/// Decimal places used for display
pub const MONEY_DP: u32 = 2;

/// Round to 2 decimal places, half-up
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Format an amount without currency (e.g. `19.97`)
pub fn format_amount(amount: Decimal) -> String {
    round_money(amount).to_string()
}

/// Format an amount with a currency prefix (e.g. `$19.97`)
pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{}{}", currency, format_amount(amount))
}
