//! Settlement status derivation
//!
//! Payables, receivables and invoices do not store a status column; it is
//! derived from their date fields against the business date.
//!
//! Priority for payables/receivables: cancelled > paid > overdue > due today > open.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::prelude::*;
use shared::models::{InvoiceStatus, Payable, Receivable, SalesInvoice, SettlementStatus};

use crate::money::{RoundingPolicy, saturating_accumulate, to_decimal, to_f64};

/// Derive the status of a payable/receivable from its dates
pub fn settlement_status(
    due_date: NaiveDate,
    paid_at: Option<NaiveDate>,
    cancelled_at: Option<NaiveDate>,
    today: NaiveDate,
) -> SettlementStatus {
    if cancelled_at.is_some() {
        return SettlementStatus::Cancelled;
    }
    if paid_at.is_some() {
        return SettlementStatus::Paid;
    }
    match due_date.cmp(&today) {
        std::cmp::Ordering::Less => SettlementStatus::Overdue,
        std::cmp::Ordering::Equal => SettlementStatus::DueToday,
        std::cmp::Ordering::Greater => SettlementStatus::Open,
    }
}

/// Days past the due date, 0 when not yet due
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days().max(0)
}

/// Derive the status of a sales invoice from its dates
pub fn invoice_status(issued_at: Option<NaiveDate>, cancelled_at: Option<NaiveDate>) -> InvoiceStatus {
    if cancelled_at.is_some() {
        InvoiceStatus::Cancelled
    } else if issued_at.is_some() {
        InvoiceStatus::Issued
    } else {
        InvoiceStatus::Draft
    }
}

/// Current business date in the given time zone
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// A dated title that is settled by a payment
pub trait Settlement {
    fn amount(&self) -> f64;
    fn due_date(&self) -> NaiveDate;
    fn paid_at(&self) -> Option<NaiveDate>;
    fn cancelled_at(&self) -> Option<NaiveDate>;

    fn status(&self, today: NaiveDate) -> SettlementStatus {
        settlement_status(self.due_date(), self.paid_at(), self.cancelled_at(), today)
    }

    /// Days overdue, 0 unless the status is `Overdue`
    fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.status(today) {
            SettlementStatus::Overdue => days_overdue(self.due_date(), today),
            _ => 0,
        }
    }
}

impl Settlement for Payable {
    fn amount(&self) -> f64 {
        self.amount
    }
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn paid_at(&self) -> Option<NaiveDate> {
        self.paid_at
    }
    fn cancelled_at(&self) -> Option<NaiveDate> {
        self.cancelled_at
    }
}

impl Settlement for Receivable {
    fn amount(&self) -> f64 {
        self.amount
    }
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn paid_at(&self) -> Option<NaiveDate> {
        self.paid_at
    }
    fn cancelled_at(&self) -> Option<NaiveDate> {
        self.cancelled_at
    }
}

/// Status of a sales invoice
pub fn sales_invoice_status(invoice: &SalesInvoice) -> InvoiceStatus {
    invoice_status(invoice.issued_at, invoice.cancelled_at)
}

/// Totals of a list of titles grouped by derived status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementSummary {
    /// Open + due today + overdue
    pub outstanding: f64,
    pub overdue: f64,
    pub due_today: f64,
    pub paid: f64,
    pub overdue_count: usize,
}

/// Sum amounts by derived status; cancelled titles are ignored
///
/// Totals saturate at the `Decimal` bounds instead of overflowing.
pub fn summarize_settlements<S: Settlement>(titles: &[S], today: NaiveDate) -> SettlementSummary {
    let mut outstanding = Decimal::ZERO;
    let mut overdue = Decimal::ZERO;
    let mut due_today = Decimal::ZERO;
    let mut paid = Decimal::ZERO;
    let mut overdue_count = 0;

    for title in titles {
        let amount = to_decimal(title.amount());
        match title.status(today) {
            SettlementStatus::Cancelled => {}
            SettlementStatus::Paid => saturating_accumulate(&mut paid, amount),
            SettlementStatus::Overdue => {
                saturating_accumulate(&mut overdue, amount);
                saturating_accumulate(&mut outstanding, amount);
                overdue_count += 1;
            }
            SettlementStatus::DueToday => {
                saturating_accumulate(&mut due_today, amount);
                saturating_accumulate(&mut outstanding, amount);
            }
            SettlementStatus::Open => saturating_accumulate(&mut outstanding, amount),
        }
    }

    let policy = RoundingPolicy::default();
    SettlementSummary {
        outstanding: to_f64(policy.money(outstanding)),
        overdue: to_f64(policy.money(overdue)),
        due_today: to_f64(policy.money(due_today)),
        paid: to_f64(policy.money(paid)),
        overdue_count,
    }
}
