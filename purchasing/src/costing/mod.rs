//! Purchase Costing Module
//!
//! This module computes the landed cost of purchase-order lines:
//! line totals, expense apportionment and the memo used by interactive
//! order entry.

mod apportion;
mod line_total;
mod memo;

pub use apportion::*;
pub use line_total::*;
pub use memo::*;

#[cfg(test)]
mod tests;
