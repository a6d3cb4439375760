//! Utility module
//!
//! - [`logger`] - tracing subscriber setup and log rotation cleanup
//! - [`validation`] - strict input validation for callers that must reject bad input

pub mod logger;
pub mod validation;

pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};
