//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for serialization. Inputs arriving from form controls are parsed here with
//! lenient fallbacks: the costing code never sees a malformed number.

use rust_decimal::prelude::*;
use shared::NumericInput;

/// Decimal places for monetary values
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Decimal places for per-unit costs (inventory costing keeps sub-cent precision)
pub const UNIT_COST_DECIMAL_PLACES: u32 = 4;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Midpoint rounding mode for monetary outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// 2.345 -> 2.35
    #[default]
    HalfUp,
    /// Banker's rounding: 2.345 -> 2.34, 2.355 -> 2.36
    HalfEven,
}

impl RoundingMode {
    /// Parse a configuration value (`half_up` / `half_even`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "half_up" | "half-up" => Some(Self::HalfUp),
            "half_even" | "half-even" | "bankers" => Some(Self::HalfEven),
            _ => None,
        }
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Precision and midpoint policy applied to computed costs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingPolicy {
    pub money_decimal_places: u32,
    pub unit_cost_decimal_places: u32,
    pub mode: RoundingMode,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            money_decimal_places: MONEY_DECIMAL_PLACES,
            unit_cost_decimal_places: UNIT_COST_DECIMAL_PLACES,
            mode: RoundingMode::default(),
        }
    }
}

impl RoundingPolicy {
    /// Round a monetary amount
    #[inline]
    pub fn money(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.money_decimal_places, self.mode.strategy())
    }

    /// Round a per-unit cost
    #[inline]
    pub fn unit_cost(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.unit_cost_decimal_places, self.mode.strategy())
    }

    /// Smallest representable monetary step (0.01 at two decimal places)
    #[inline]
    pub fn money_unit(&self) -> Decimal {
        Decimal::new(1, self.money_decimal_places)
    }

    /// Truncate a monetary amount toward zero
    #[inline]
    pub fn money_floor(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.money_decimal_places, RoundingStrategy::ToZero)
    }
}

/// Convert f64 to Decimal for calculation
///
/// NaN/Infinity (or values beyond Decimal range) log an error and become ZERO
/// so a corrupted field never poisons a whole order.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for serialization
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Sum Decimals without panicking
///
/// `None` when the running total leaves the `Decimal` range (about ±7.9e28).
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// Add `amount` to `total`, saturating at the `Decimal` bounds
pub fn saturating_accumulate(total: &mut Decimal, amount: Decimal) {
    *total = total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(total = %total, amount = %amount, "Decimal total overflowed, saturating");
        if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    });
}

/// Normalize a locale-formatted number to the `1234.56` form
///
/// The last comma is the decimal separator; dots before it are digit
/// grouping and are dropped ("1.234,56" -> "1234.56"). Strings without a
/// comma are returned trimmed.
pub fn normalize_decimal_separator(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rfind(',') {
        Some(pos) => {
            let (integer_part, fraction_part) = trimmed.split_at(pos);
            format!("{}.{}", integer_part.replace('.', ""), &fraction_part[1..])
        }
        None => trimmed.to_string(),
    }
}

/// Parse a locale-formatted decimal string, `None` if it is not a number
pub fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_separator(raw);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Interpret a numeric input strictly, `None` when it cannot be read
pub fn read_numeric(input: &NumericInput) -> Option<Decimal> {
    match input {
        NumericInput::Number(n) if n.is_finite() => Decimal::from_f64(*n),
        NumericInput::Number(_) => None,
        NumericInput::Text(s) => parse_decimal_text(s),
    }
}

/// Parse a monetary amount leniently
///
/// Unparsable values and negative amounts are treated as zero.
pub fn parse_amount(input: &NumericInput) -> Decimal {
    match read_numeric(input) {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            tracing::warn!(value = %value, "Negative amount treated as zero");
            Decimal::ZERO
        }
        Some(value) => value,
        None => {
            if input.as_text().is_some_and(|s| !s.trim().is_empty()) {
                tracing::debug!(input = ?input, "Unparsable amount treated as zero");
            }
            Decimal::ZERO
        }
    }
}

/// Parse a quantity leniently
///
/// Missing, unparsable, zero or negative quantities fall back to one.
pub fn parse_quantity(input: Option<&NumericInput>) -> Decimal {
    match input.and_then(read_numeric) {
        Some(quantity) if quantity > Decimal::ZERO => quantity,
        _ => Decimal::ONE,
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
