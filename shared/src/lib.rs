//! Shared types for the back office
//!
//! Common types used across crates: data models exchanged with the admin
//! panel, the unified error system, and input types.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::NumericInput;
