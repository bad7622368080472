//! Currency rounding
//!
//! Every monetary figure produced by this crate passes through
//! [`round_currency`]: round-half-away-from-zero to two decimal places.
//! Rounding is applied per value, never to a running total, so derived sums
//! may drift from their exact counterparts:
//!
//! - one split over `N` participants: `|amount - Σshares| <= 0.01 × N`
//! - balances: `Σbalances` is the sum of every expense's residual, plus at
//!   most half a unit per participant from rounding each final balance
//!
//! Drift is tolerated and never corrected silently.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the currency unit
pub const CURRENCY_SCALE: u32 = 2;

/// Smallest currency unit (0.01); also the settled/equality tolerance
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, CURRENCY_SCALE);

/// Largest accepted amount or split value (one trillion units)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Round to currency precision, half away from zero
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether two amounts agree within one currency unit
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Upper bound of rounding drift for `count` independently rounded values
pub fn drift_bound(count: usize) -> Decimal {
    TOLERANCE * Decimal::from(count)
}
