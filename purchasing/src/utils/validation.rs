//! Input validation helpers
//!
//! The calculator is lenient: it never rejects input. Callers that must
//! refuse malformed orders (imports, API endpoints) validate here first.
//! Every error carries the offending `field` in its details; line-item
//! errors raised through [`validate_order`] also carry the line `index`.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use shared::models::{OrderExpenses, PurchaseOrderItem};
use shared::{AppError, AppResult, ErrorCode, NumericInput};

use crate::money::read_numeric;

/// Maximum accepted monetary amount (R$ 1,000,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Descriptions of payables and receivables
pub const MAX_DESCRIPTION_LEN: usize = 500;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_field(
            ErrorCode::RequiredField,
            field,
            format!("{field} must not be empty"),
        ));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::invalid_field(
            ErrorCode::ValueOutOfRange,
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

// ── Amounts ─────────────────────────────────────────────────────────

/// Finite, non-negative and at most [`MAX_AMOUNT`]
fn require_amount(value: f64, field: &str, code: ErrorCode) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_field(
            code,
            field,
            format!("{field} must be a finite number, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(AppError::invalid_field(
            code,
            field,
            format!("{field} must be non-negative, got {value}"),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::invalid_field(
            code,
            field,
            format!("{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"),
        ));
    }
    Ok(())
}

/// Validate one expense field; a blank form field counts as zero
fn validate_expense(input: &NumericInput, field: &str) -> AppResult<()> {
    if input.as_text().is_some_and(|s| s.trim().is_empty()) {
        return Ok(());
    }
    let value = read_numeric(input).ok_or_else(|| {
        AppError::invalid_field(
            ErrorCode::InvalidExpense,
            field,
            format!("{field} is not a number: {input:?}"),
        )
    })?;
    require_amount(
        value.to_f64().unwrap_or(f64::INFINITY),
        field,
        ErrorCode::InvalidExpense,
    )
}

// ── Purchase orders ─────────────────────────────────────────────────

/// Validate a line item before apportionment
pub fn validate_line_item(item: &PurchaseOrderItem) -> AppResult<()> {
    require_amount(item.line_total, "line_total", ErrorCode::InvalidLineTotal)?;
    require_amount(item.unit_price, "unit_price", ErrorCode::InvalidUnitPrice)?;
    require_amount(item.unit_discount, "unit_discount", ErrorCode::InvalidUnitDiscount)?;
    if item.unit_discount > item.unit_price {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidUnitDiscount,
            "unit_discount",
            format!(
                "unit_discount ({}) exceeds unit_price ({})",
                item.unit_discount, item.unit_price
            ),
        ));
    }

    let quantity = item.quantity.as_ref().ok_or_else(|| {
        AppError::invalid_field(ErrorCode::InvalidQuantity, "quantity", "quantity is required")
    })?;
    match read_numeric(quantity) {
        Some(q) if q > Decimal::ZERO => Ok(()),
        Some(q) => Err(AppError::invalid_field(
            ErrorCode::InvalidQuantity,
            "quantity",
            format!("quantity must be positive, got {q}"),
        )),
        None => Err(AppError::invalid_field(
            ErrorCode::InvalidQuantity,
            "quantity",
            format!("quantity is not a number: {quantity:?}"),
        )),
    }
}

/// Validate the three order-level expenses
pub fn validate_expenses(expenses: &OrderExpenses) -> AppResult<()> {
    validate_expense(&expenses.freight, "freight")?;
    validate_expense(&expenses.insurance, "insurance")?;
    validate_expense(&expenses.other, "other")
}

/// Validate a whole purchase order
///
/// Stops at the first error; line errors include the line `index`.
pub fn validate_order(items: &[PurchaseOrderItem], expenses: &OrderExpenses) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::PurchaseOrderEmpty));
    }
    for (index, item) in items.iter().enumerate() {
        validate_line_item(item).map_err(|e| e.with_detail("index", index))?;
    }
    validate_expenses(expenses)
}

// ── Settlements ─────────────────────────────────────────────────────

/// Validate a payable/receivable before it is stored
pub fn validate_settlement(
    description: &str,
    amount: f64,
    paid_at: Option<NaiveDate>,
    cancelled_at: Option<NaiveDate>,
) -> AppResult<()> {
    validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?;
    require_amount(amount, "amount", ErrorCode::InvalidSettlementAmount)?;
    if amount == 0.0 {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidSettlementAmount,
            "amount",
            "amount must be positive",
        ));
    }
    if paid_at.is_some() && cancelled_at.is_some() {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidSettlementDates,
            "cancelled_at",
            "a title cannot be both paid and cancelled",
        ));
    }
    Ok(())
}
