//! Unified error codes for the back office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Purchase errors
//! - 5xxx: Finance errors (payables, receivables, invoices)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Purchase ====================
    /// Purchase order has no line items
    PurchaseOrderEmpty = 4001,
    /// Line total is negative or not a finite number
    InvalidLineTotal = 4002,
    /// Quantity is missing, unparsable or not positive
    InvalidQuantity = 4003,
    /// Freight, insurance or other charge is unparsable or negative
    InvalidExpense = 4004,
    /// Unit price is negative or not a finite number
    InvalidUnitPrice = 4005,
    /// Unit discount is negative or exceeds the unit price
    InvalidUnitDiscount = 4006,

    // ==================== 5xxx: Finance ====================
    /// Settlement amount is negative or not a finite number
    InvalidSettlementAmount = 5001,
    /// Settlement dates are inconsistent
    InvalidSettlementDates = 5002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Purchase
            ErrorCode::PurchaseOrderEmpty => "Purchase order has no line items",
            ErrorCode::InvalidLineTotal => "Line total must be a non-negative number",
            ErrorCode::InvalidQuantity => "Quantity must be a positive number",
            ErrorCode::InvalidExpense => "Order expense must be a non-negative number",
            ErrorCode::InvalidUnitPrice => "Unit price must be a non-negative number",
            ErrorCode::InvalidUnitDiscount => "Unit discount must be between zero and unit price",

            // Finance
            ErrorCode::InvalidSettlementAmount => "Settlement amount must be a non-negative number",
            ErrorCode::InvalidSettlementDates => "Settlement dates are inconsistent",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

/// Error returned when a u16 does not map to any [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Purchase
            4001 => Ok(ErrorCode::PurchaseOrderEmpty),
            4002 => Ok(ErrorCode::InvalidLineTotal),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::InvalidExpense),
            4005 => Ok(ErrorCode::InvalidUnitPrice),
            4006 => Ok(ErrorCode::InvalidUnitDiscount),

            // Finance
            5001 => Ok(ErrorCode::InvalidSettlementAmount),
            5002 => Ok(ErrorCode::InvalidSettlementDates),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
