//! Purchasing cost engine for the back office
//!
//! # Overview
//!
//! - **Costing** (`costing`): line totals, proportional apportionment of
//!   freight/insurance/other charges ("rateio") and the apportionment memo
//! - **Settlement** (`settlement`): status of payables, receivables and
//!   sales invoices derived from their dates
//! - **Money** (`money`): `Decimal` arithmetic, locale-aware number parsing,
//!   rounding policy
//!
//! # Module layout
//!
//! ```text
//! purchasing/src/
//! ├── core/          # configuration
//! ├── costing/       # apportionment, line totals, memo
//! ├── money/         # decimal helpers and parsing
//! ├── settlement/    # payable/receivable/invoice status
//! └── utils/         # logger, validation
//! ```
//!
//! # Example
//!
//! ```
//! use purchasing::costing::apportion_expenses;
//! use shared::models::{OrderExpenses, PurchaseOrderItem};
//!
//! let items = vec![PurchaseOrderItem::new(100.0, 2), PurchaseOrderItem::new(300.0, 3)];
//! let result = apportion_expenses(&items, &OrderExpenses::new("40,00", 0.0, ""));
//!
//! assert_eq!(result[0].final_unit_cost, Some(55.0));
//! assert_eq!(result[1].final_unit_cost, Some(110.0));
//! ```

pub mod core;
pub mod costing;
pub mod money;
pub mod settlement;
pub mod utils;

pub use crate::core::Config;
pub use costing::{ApportionMemo, ApportionSummary, Apportioner, apportion_expenses};
pub use money::{RoundingMode, RoundingPolicy};
pub use settlement::{Settlement, SettlementSummary, settlement_status, summarize_settlements};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, read and validate the configuration, install the logger
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::info!(
        rounding = %config.rounding_strategy,
        money_decimal_places = config.money_decimal_places,
        unit_cost_decimal_places = config.unit_cost_decimal_places,
        memo_enabled = config.memo_enabled,
        timezone = %config.business_timezone,
        "Purchasing engine configured"
    );
    Ok(config)
}

/// Apportioner using the configured rounding policy
pub fn apportioner_from_config(config: &Config) -> AppResult<Apportioner> {
    Ok(Apportioner::new(config.rounding_policy()?))
}

/// Apportionment memo honouring `APPORTION_MEMO_ENABLED`
pub fn memo_from_config(config: &Config) -> AppResult<ApportionMemo> {
    let apportioner = apportioner_from_config(config)?;
    Ok(if config.memo_enabled {
        ApportionMemo::new(apportioner)
    } else {
        ApportionMemo::disabled(apportioner)
    })
}

/// Business date in the configured time zone
pub fn business_today(config: &Config) -> AppResult<chrono::NaiveDate> {
    Ok(settlement::today_in(config.timezone()?))
}
