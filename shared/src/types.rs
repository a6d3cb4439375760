//! Common types for the shared crate
//!
//! Utility types used across the back office

use serde::{Deserialize, Serialize};

/// A numeric field as it arrives from a form control
///
/// Numeric inputs in the admin panel submit raw strings ("12,50"), while
/// API clients send JSON numbers. Both shapes deserialize into this type;
/// interpretation (locale normalization, fallbacks) is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Raw text as submitted, if the value arrived as a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
