use chrono_tz::Tz;
use shared::{AppError, AppResult};

use crate::money::{MONEY_DECIMAL_PLACES, RoundingMode, RoundingPolicy, UNIT_COST_DECIMAL_PLACES};

/// Highest precision accepted for either rounding scale
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Purchasing engine configuration
///
/// # Environment variables
///
/// Every setting can be overridden from the environment (or a `.env` file
/// loaded by [`crate::setup_environment`]):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOG_LEVEL | info | tracing level |
/// | LOG_JSON | false | JSON console output |
/// | LOG_DIR | (unset) | daily rolling log directory |
/// | MONEY_DECIMAL_PLACES | 2 | precision of monetary outputs |
/// | UNIT_COST_DECIMAL_PLACES | 4 | precision of unit costs |
/// | ROUNDING_STRATEGY | half_up | half_up or half_even |
/// | APPORTION_MEMO_ENABLED | true | apportionment memo on/off |
/// | BUSINESS_TIMEZONE | America/Sao_Paulo | zone used to resolve "today" |
///
/// # Example
///
/// ```ignore
/// ROUNDING_STRATEGY=half_even LOG_LEVEL=debug cargo test
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    /// Log directory; console only when unset
    pub log_dir: Option<String>,
    pub money_decimal_places: u32,
    pub unit_cost_decimal_places: u32,
    /// Raw strategy name, checked by [`Config::validate`]
    pub rounding_strategy: String,
    pub memo_enabled: bool,
    /// IANA zone name, e.g. `America/Sao_Paulo`
    pub business_timezone: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Used by tests to avoid touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()),
            money_decimal_places: lookup("MONEY_DECIMAL_PLACES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(MONEY_DECIMAL_PLACES),
            unit_cost_decimal_places: lookup("UNIT_COST_DECIMAL_PLACES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(UNIT_COST_DECIMAL_PLACES),
            rounding_strategy: lookup("ROUNDING_STRATEGY").unwrap_or_else(|| "half_up".into()),
            memo_enabled: lookup("APPORTION_MEMO_ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            business_timezone: lookup("BUSINESS_TIMEZONE")
                .unwrap_or_else(|| "America/Sao_Paulo".into()),
        }
    }

    /// Check the values that can be read but not used
    pub fn validate(&self) -> AppResult<()> {
        for (name, places) in [
            ("MONEY_DECIMAL_PLACES", self.money_decimal_places),
            ("UNIT_COST_DECIMAL_PLACES", self.unit_cost_decimal_places),
        ] {
            if places > MAX_DECIMAL_PLACES {
                return Err(AppError::config(format!(
                    "{name} must be at most {MAX_DECIMAL_PLACES}, got {places}"
                ))
                .with_detail("field", name));
            }
        }
        self.rounding_policy()?;
        self.timezone()?;
        Ok(())
    }

    /// Rounding policy described by this configuration
    pub fn rounding_policy(&self) -> AppResult<RoundingPolicy> {
        let mode = RoundingMode::parse(&self.rounding_strategy).ok_or_else(|| {
            AppError::config(format!(
                "Unknown rounding strategy '{}', expected half_up or half_even",
                self.rounding_strategy
            ))
            .with_detail("field", "ROUNDING_STRATEGY")
        })?;

        Ok(RoundingPolicy {
            money_decimal_places: self.money_decimal_places,
            unit_cost_decimal_places: self.unit_cost_decimal_places,
            mode,
        })
    }

    /// Business time zone
    pub fn timezone(&self) -> AppResult<Tz> {
        self.business_timezone.parse::<Tz>().map_err(|_| {
            AppError::config(format!("Unknown time zone '{}'", self.business_timezone))
                .with_detail("field", "BUSINESS_TIMEZONE")
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
