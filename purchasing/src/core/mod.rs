//! Core module - engine configuration
//!
//! - [`Config`] - environment-driven settings (logging, rounding, memo, time zone)

pub mod config;

pub use config::Config;
