//! Settlement Models
//!
//! Payables, receivables and sales invoices. Their status is never stored;
//! it is derived from the date fields on read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived status of a payable or receivable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    /// Not yet due
    Open,
    /// Due today
    DueToday,
    /// Past due date and unpaid
    Overdue,
    Paid,
    Cancelled,
}

impl SettlementStatus {
    /// Whether the title still expects a payment
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Open | Self::DueToday | Self::Overdue)
    }
}

/// Derived status of a sales invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Cancelled,
}

/// Account payable (owed to a supplier)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payable {
    pub id: Option<i64>,
    /// Supplier reference
    pub supplier_id: Option<i64>,
    pub description: String,
    /// Amount in currency unit
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_at: Option<NaiveDate>,
    pub cancelled_at: Option<NaiveDate>,
}

/// Account receivable (owed by a customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receivable {
    pub id: Option<i64>,
    /// Customer reference
    pub customer_id: Option<i64>,
    pub description: String,
    /// Amount in currency unit
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_at: Option<NaiveDate>,
    pub cancelled_at: Option<NaiveDate>,
}

/// Sales invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub id: Option<i64>,
    pub number: String,
    pub customer_id: Option<i64>,
    /// Total in currency unit
    pub total: f64,
    pub issued_at: Option<NaiveDate>,
    pub cancelled_at: Option<NaiveDate>,
}
