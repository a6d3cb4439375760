//! Apportionment memo
//!
//! Interactive order entry re-runs apportionment on every input change. The
//! memo keeps the last result keyed by a SHA-256 digest of the canonical JSON
//! encoding of `(items, expenses)`, so an unchanged input tuple is served
//! without recomputation. Results are always identical to
//! [`Apportioner::apportion_expenses`].
//!
//! JSON has no NaN or infinity (serde_json writes them as `null`), so inputs
//! holding non-finite numbers are never memoized.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use shared::NumericInput;
use shared::models::{OrderExpenses, PurchaseOrderItem};

use super::apportion::Apportioner;

struct MemoEntry {
    key: String,
    items: Vec<PurchaseOrderItem>,
}

/// Single-slot cache in front of an [`Apportioner`]
pub struct ApportionMemo {
    apportioner: Apportioner,
    enabled: bool,
    slot: Mutex<Option<MemoEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ApportionMemo {
    pub fn new(apportioner: Apportioner) -> Self {
        Self {
            apportioner,
            enabled: true,
            slot: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A memo that always recomputes
    pub fn disabled(apportioner: Apportioner) -> Self {
        Self {
            enabled: false,
            ..Self::new(apportioner)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the apportioned items, recomputing only when the inputs changed
    pub fn apportion(
        &self,
        items: &[PurchaseOrderItem],
        expenses: &OrderExpenses,
    ) -> Vec<PurchaseOrderItem> {
        if !self.enabled {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return self.apportioner.apportion_expenses(items, expenses);
        }

        let Some(key) = input_key(items, expenses) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return self.apportioner.apportion_expenses(items, expenses);
        };

        let mut slot = self.slot.lock();
        if let Some(entry) = slot.as_ref()
            && entry.key == key
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return entry.items.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.apportioner.apportion_expenses(items, expenses);
        *slot = Some(MemoEntry {
            key,
            items: result.clone(),
        });
        result
    }

    /// Drop the cached result
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for ApportionMemo {
    fn default() -> Self {
        Self::new(Apportioner::default())
    }
}

/// Hex SHA-256 of the canonical JSON encoding of the input tuple
///
/// `None` when the tuple cannot be keyed unambiguously.
fn input_key(items: &[PurchaseOrderItem], expenses: &OrderExpenses) -> Option<String> {
    if !all_finite(items, expenses) {
        tracing::debug!(item_count = items.len(), "Non-finite apportionment input, skipping memo");
        return None;
    }
    match serde_json::to_vec(&(items, expenses)) {
        Ok(bytes) => Some(hex::encode(Sha256::digest(&bytes))),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode apportionment input, skipping memo");
            None
        }
    }
}

fn all_finite(items: &[PurchaseOrderItem], expenses: &OrderExpenses) -> bool {
    let finite_input = |input: &NumericInput| match input {
        NumericInput::Number(n) => n.is_finite(),
        NumericInput::Text(_) => true,
    };

    items.iter().all(|item| {
        [
            item.unit_price,
            item.unit_discount,
            item.line_total,
            item.apportioned_cost,
            item.final_total_cost,
        ]
        .iter()
        .all(|v| v.is_finite())
            && item.final_unit_cost.is_none_or(f64::is_finite)
            && item.quantity.as_ref().is_none_or(finite_input)
    }) && [&expenses.freight, &expenses.insurance, &expenses.other]
        .into_iter()
        .all(finite_input)
}
