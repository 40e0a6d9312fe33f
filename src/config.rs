use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::decimal::Rate;
use crate::errors::{LedgerError, Result};

pub const SIMPLE_RATE_VAR: &str = "SIMPLE_INTEREST_ANNUAL_RATE";
pub const COMPOUND_RATE_VAR: &str = "COMPOUND_INTEREST_ANNUAL_RATE";
pub const COMPOUND_FREQUENCY_VAR: &str = "COMPOUND_INTEREST_FREQUENCY";

/// fallback interest policy used when a transaction leaves its rate or
/// compounding frequency unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestDefaults {
    /// annual simple rate, recorded as a percentage
    #[serde(with = "crate::decimal::percent", default = "default_rate")]
    pub default_simple_rate: Rate,
    /// annual compound rate, recorded as a percentage
    #[serde(with = "crate::decimal::percent", default = "default_rate")]
    pub default_compound_rate: Rate,
    /// compounding periods per year
    #[serde(default = "default_frequency")]
    pub default_compound_frequency: u32,
}

fn default_rate() -> Rate {
    Rate::from_percentage(12)
}

fn default_frequency() -> u32 {
    12
}

impl Default for InterestDefaults {
    fn default() -> Self {
        Self {
            default_simple_rate: default_rate(),
            default_compound_rate: default_rate(),
            default_compound_frequency: default_frequency(),
        }
    }
}

impl InterestDefaults {
    pub fn new(simple_rate: Rate, compound_rate: Rate, compound_frequency: u32) -> Result<Self> {
        let defaults = Self {
            default_simple_rate: simple_rate,
            default_compound_rate: compound_rate,
            default_compound_frequency: compound_frequency,
        };
        defaults.validate()?;
        Ok(defaults)
    }

    /// read defaults from the process environment, keeping built-in values
    /// for variables that are not set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// read defaults from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut defaults = Self::default();

        if let Some(raw) = lookup(SIMPLE_RATE_VAR) {
            defaults.default_simple_rate = parse_percentage(SIMPLE_RATE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(COMPOUND_RATE_VAR) {
            defaults.default_compound_rate = parse_percentage(COMPOUND_RATE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(COMPOUND_FREQUENCY_VAR) {
            defaults.default_compound_frequency = raw.trim().parse::<u32>().map_err(|e| {
                LedgerError::InvalidConfiguration {
                    message: format!("{COMPOUND_FREQUENCY_VAR}={raw}: {e}"),
                }
            })?;
        }

        defaults.validate()?;
        tracing::debug!(
            simple_rate = %defaults.default_simple_rate,
            compound_rate = %defaults.default_compound_rate,
            frequency = defaults.default_compound_frequency,
            "loaded interest defaults"
        );
        Ok(defaults)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let defaults: Self = serde_json::from_str(json)?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn validate(&self) -> Result<()> {
        for rate in [self.default_simple_rate, self.default_compound_rate] {
            if rate.is_negative() {
                return Err(LedgerError::InvalidInterestRate { rate });
            }
        }
        if self.default_compound_frequency == 0 {
            return Err(LedgerError::InvalidCompoundFrequency {
                frequency: self.default_compound_frequency,
            });
        }
        Ok(())
    }
}

fn parse_percentage(key: &str, raw: &str) -> Result<Rate> {
    Decimal::from_str(raw.trim())
        .map(Rate::from_percentage_decimal)
        .map_err(|e| LedgerError::InvalidConfiguration {
            message: format!("{key}={raw}: {e}"),
        })
}
