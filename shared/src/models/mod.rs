//! Data models
//!
//! Shared between the purchasing engine and the admin panel (via API).
//! All IDs are `i64`.

pub mod purchase_order;
pub mod settlement;

// Re-exports
pub use purchase_order::*;
pub use settlement::*;
