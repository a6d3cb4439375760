//! Expense apportionment ("rateio")
//!
//! Distributes order-level freight, insurance and other charges across
//! purchase-order line items in proportion to each line total, then derives
//! the final total and unit cost of every line.
//!
//! # Calculation Steps
//! 1. `total_expenses = freight + insurance + other`
//! 2. `total_line_value = Σ line_total`
//! 3. If either is zero: every line gets `apportioned_cost = 0`,
//!    `final_total_cost = line_total` and no unit cost
//! 4. Otherwise `apportioned_cost = total_expenses × line_total / total_line_value`,
//!    `final_total_cost = line_total + apportioned_cost`,
//!    `final_unit_cost = final_total_cost / quantity` (quantity falls back to 1)
//!
//! # Rounding
//! Shares are truncated to money precision and the remaining cents of the
//! rounded expense total go one at a time to the lines with the largest
//! truncated remainders (earlier lines win ties). The apportioned costs
//! therefore always add up to the rounded expense total.
//!
//! # Range limits
//! Amounts are `Decimal` (about ±7.9e28). When the expense total, the line
//! value total or any line's final total would leave that range, the run
//! logs a warning and returns the unapportioned result of step 3 instead of
//! failing.

use rust_decimal::prelude::*;
use shared::NumericInput;
use shared::models::{OrderExpenses, PurchaseOrderItem};

use crate::money::{
    RoundingPolicy, checked_sum, parse_amount, parse_quantity, to_decimal, to_f64,
};

/// Aggregates of one apportionment run
#[derive(Debug, Clone, PartialEq)]
pub struct ApportionSummary {
    pub item_count: usize,
    /// Parsed freight + insurance + other (unrounded)
    pub total_expenses: f64,
    /// Σ line_total
    pub total_line_value: f64,
    /// Σ apportioned_cost
    pub total_apportioned: f64,
    /// True when nothing was apportioned (zero expenses or zero line value)
    pub degenerate: bool,
}

/// Expense apportionment bound to a rounding policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Apportioner {
    policy: RoundingPolicy,
}

impl Apportioner {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RoundingPolicy {
        &self.policy
    }

    /// Apportion the three expense amounts across `items`
    ///
    /// Returns a new list in input order; `items` is left untouched.
    pub fn apportion(
        &self,
        items: &[PurchaseOrderItem],
        freight: &NumericInput,
        insurance: &NumericInput,
        other: &NumericInput,
    ) -> Vec<PurchaseOrderItem> {
        let (result, _) = self.apportion_with_summary(items, freight, insurance, other);
        result
    }

    /// Apportion an [`OrderExpenses`] record across `items`
    pub fn apportion_expenses(
        &self,
        items: &[PurchaseOrderItem],
        expenses: &OrderExpenses,
    ) -> Vec<PurchaseOrderItem> {
        self.apportion(items, &expenses.freight, &expenses.insurance, &expenses.other)
    }

    /// Apportion and report the aggregates of the run
    pub fn apportion_with_summary(
        &self,
        items: &[PurchaseOrderItem],
        freight: &NumericInput,
        insurance: &NumericInput,
        other: &NumericInput,
    ) -> (Vec<PurchaseOrderItem>, ApportionSummary) {
        let total_expenses =
            checked_sum([parse_amount(freight), parse_amount(insurance), parse_amount(other)]);

        // Negative line totals carry no weight
        let weights: Vec<Decimal> = items
            .iter()
            .map(|item| to_decimal(item.line_total).max(Decimal::ZERO))
            .collect();
        let total_line_value = checked_sum(weights.iter().copied());

        let priced = match (total_expenses, total_line_value) {
            (Some(expenses), Some(line_value)) if expenses.is_zero() || line_value.is_zero() => None,
            (Some(expenses), Some(line_value)) => {
                let priced = self.price_lines(items, expenses, &weights, line_value);
                if priced.is_none() {
                    tracing::warn!(
                        total_expenses = %expenses,
                        total_line_value = %line_value,
                        "Apportioned cost exceeds decimal range, nothing apportioned"
                    );
                }
                priced
            }
            _ => {
                tracing::warn!(
                    item_count = items.len(),
                    "Order totals exceed decimal range, nothing apportioned"
                );
                None
            }
        };

        let degenerate = priced.is_none();
        let (result, total_apportioned) = match priced {
            Some(priced) => priced,
            None => (items.iter().map(unapportioned).collect(), Decimal::ZERO),
        };

        // Totals that left the Decimal range are reported saturated
        let total_expenses = total_expenses.unwrap_or(Decimal::MAX);
        let total_line_value = total_line_value.unwrap_or(Decimal::MAX);

        tracing::debug!(
            item_count = items.len(),
            total_expenses = %total_expenses,
            total_line_value = %total_line_value,
            total_apportioned = %total_apportioned,
            degenerate,
            "Apportioned order expenses"
        );

        let summary = ApportionSummary {
            item_count: items.len(),
            total_expenses: to_f64(total_expenses),
            total_line_value: to_f64(total_line_value),
            total_apportioned: to_f64(total_apportioned),
            degenerate,
        };

        (result, summary)
    }

    /// General branch: every line gets its share, final total and unit cost
    ///
    /// `None` when any intermediate amount leaves the `Decimal` range; the
    /// caller then falls back to the unapportioned result.
    fn price_lines(
        &self,
        items: &[PurchaseOrderItem],
        total_expenses: Decimal,
        weights: &[Decimal],
        total_line_value: Decimal,
    ) -> Option<(Vec<PurchaseOrderItem>, Decimal)> {
        let shares = self.distribute(total_expenses, weights, total_line_value)?;
        let total_apportioned = checked_sum(shares.iter().copied())?;
        let priced = items
            .iter()
            .zip(shares)
            .map(|(item, share)| self.apply_share(item, share))
            .collect::<Option<Vec<_>>>()?;
        Some((priced, total_apportioned))
    }

    /// Split `total` proportionally to `weights`, at money precision
    ///
    /// Largest-remainder method: truncate every exact share, then hand out
    /// the leftover money units by descending remainder.
    fn distribute(
        &self,
        total: Decimal,
        weights: &[Decimal],
        weight_sum: Decimal,
    ) -> Option<Vec<Decimal>> {
        let exact = weights
            .iter()
            .map(|w| w.checked_div(weight_sum).and_then(|ratio| total.checked_mul(ratio)))
            .collect::<Option<Vec<Decimal>>>()?;
        let mut shares: Vec<Decimal> = exact.iter().map(|s| self.policy.money_floor(*s)).collect();

        let target = self.policy.money(total);
        let allocated = checked_sum(shares.iter().copied())?;
        let unit = self.policy.money_unit();
        let leftover_units = target
            .checked_sub(allocated)?
            .checked_div(unit)?
            .round()
            .to_usize()
            .unwrap_or(0);

        if leftover_units > 0 {
            let mut order: Vec<usize> = (0..shares.len()).collect();
            // Stable sort keeps input order among equal remainders
            order.sort_by(|&a, &b| (exact[b] - shares[b]).cmp(&(exact[a] - shares[a])));
            for &idx in order.iter().take(leftover_units) {
                shares[idx] = shares[idx].checked_add(unit)?;
            }
        }

        Some(shares)
    }

    fn apply_share(&self, item: &PurchaseOrderItem, share: Decimal) -> Option<PurchaseOrderItem> {
        let final_total = self
            .policy
            .money(to_decimal(item.line_total).checked_add(share)?);
        let quantity = parse_quantity(item.quantity.as_ref());
        // Quantities small enough to overflow the division count as one
        let unit_cost = self
            .policy
            .unit_cost(final_total.checked_div(quantity).unwrap_or(final_total));

        Some(PurchaseOrderItem {
            apportioned_cost: to_f64(share),
            final_total_cost: to_f64(final_total),
            final_unit_cost: Some(to_f64(unit_cost)),
            ..item.clone()
        })
    }
}

/// Copy of `item` with nothing apportioned
fn unapportioned(item: &PurchaseOrderItem) -> PurchaseOrderItem {
    PurchaseOrderItem {
        apportioned_cost: 0.0,
        final_total_cost: item.line_total,
        final_unit_cost: None,
        ..item.clone()
    }
}

/// Apportion expenses with the default rounding policy
///
/// Never fails: unparsable expense amounts count as zero and unusable
/// quantities as one.
pub fn apportion(
    items: &[PurchaseOrderItem],
    freight: &NumericInput,
    insurance: &NumericInput,
    other: &NumericInput,
) -> Vec<PurchaseOrderItem> {
    Apportioner::default().apportion(items, freight, insurance, other)
}

/// Apportion an [`OrderExpenses`] record with the default rounding policy
pub fn apportion_expenses(
    items: &[PurchaseOrderItem],
    expenses: &OrderExpenses,
) -> Vec<PurchaseOrderItem> {
    Apportioner::default().apportion_expenses(items, expenses)
}
