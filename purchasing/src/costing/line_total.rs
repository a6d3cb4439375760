//! Line total calculation
//!
//! Formula: max(0, unit_price - unit_discount) × quantity
//!
//! This is the pre-expense value the order-entry form shows for each line
//! and the weight used by apportionment.

use rust_decimal::prelude::*;
use shared::NumericInput;
use shared::models::PurchaseOrderItem;

use crate::money::{RoundingPolicy, parse_quantity, to_decimal, to_f64};

/// Calculate a line total with the default rounding policy
pub fn line_total(unit_price: f64, quantity: Option<&NumericInput>, unit_discount: f64) -> f64 {
    to_f64(line_total_decimal(
        &RoundingPolicy::default(),
        unit_price,
        quantity,
        unit_discount,
    ))
}

/// Calculate a line total with precise decimal arithmetic
///
/// Discounts larger than the unit price clamp the unit net price to zero.
/// Products beyond the `Decimal` range saturate at `Decimal::MAX`.
pub fn line_total_decimal(
    policy: &RoundingPolicy,
    unit_price: f64,
    quantity: Option<&NumericInput>,
    unit_discount: f64,
) -> Decimal {
    let quantity = parse_quantity(quantity);
    let total = to_decimal(unit_price)
        .checked_sub(to_decimal(unit_discount))
        .map(|net_unit| net_unit.max(Decimal::ZERO))
        .and_then(|net_unit| net_unit.checked_mul(quantity));
    match total {
        Some(total) => policy.money(total),
        None => {
            tracing::warn!(
                unit_price,
                unit_discount,
                quantity = %quantity,
                "Line total exceeds decimal range, saturating"
            );
            Decimal::MAX
        }
    }
}

/// Copy of `item` with `line_total` recomputed from its unit pricing
pub fn with_line_total(item: &PurchaseOrderItem) -> PurchaseOrderItem {
    PurchaseOrderItem {
        line_total: line_total(item.unit_price, item.quantity.as_ref(), item.unit_discount),
        ..item.clone()
    }
}
