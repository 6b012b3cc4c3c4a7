//! Money helpers. Amounts are `NUMERIC(10,2)` in the database and serialize
//! as two-decimal strings (`"200.00"`).

use rust_decimal::Decimal;

/// Number of decimal places kept for every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Round to cents and pin the scale so `200` renders as `"200.00"`.
pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(MONEY_SCALE);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Subtotal of a line: `price × quantity`, normalized.
pub fn line_subtotal(price: Decimal, quantity: i32) -> Decimal {
    normalize(price * Decimal::from(quantity))
}
