use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::interest::accrual::accrual_days;
use crate::interest::CompoundInterest;
use crate::types::Transaction;

/// common compounding frequencies, in periods per year
pub mod frequency {
    pub const ANNUAL: u32 = 1;
    pub const SEMI_ANNUAL: u32 = 2;
    pub const QUARTERLY: u32 = 4;
    pub const MONTHLY: u32 = 12;
    pub const WEEKLY: u32 = 52;
    pub const DAILY: u32 = 365;
}

/// engine for compound accrual
#[derive(Debug, Clone, Copy)]
pub struct CompoundInterestEngine {
    pub default_rate: Rate,
    pub default_frequency: u32,
}

impl CompoundInterestEngine {
    pub fn new(default_rate: Rate, default_frequency: u32) -> Self {
        Self {
            default_rate,
            default_frequency,
        }
    }

    pub fn effective_rate(&self, transaction: &Transaction) -> Rate {
        transaction.interest_rate.unwrap_or(self.default_rate)
    }

    pub fn effective_frequency(&self, transaction: &Transaction) -> u32 {
        transaction.compound_frequency.unwrap_or(self.default_frequency)
    }

    /// accrue `principal * (1 + r/n)^(n*t)` with `t = days / 365`.
    ///
    /// the exponent is not floored to whole periods, so a partial period
    /// grows continuously.
    ///
    /// growth is bounded by `Decimal::MAX` (about 7.9e28). past that the
    /// result carries the principal with zero interest and a warning, so
    /// accrual stops being monotonic for extreme rate and horizon pairs.
    pub fn calculate(&self, transaction: &Transaction, as_of: DateTime<Utc>) -> CompoundInterest {
        let rate = self.effective_rate(transaction);
        let n = self.effective_frequency(transaction);

        let Some(days) = accrual_days(transaction.transaction_date, as_of) else {
            return CompoundInterest {
                interest_amount: Money::ZERO,
                total_with_interest: transaction.amount,
                days_elapsed: 0,
                interest_rate: rate.as_percentage(),
                frequency: n,
            };
        };

        let total = match compound_total(transaction.amount, rate, n, days) {
            Some(total) => total,
            None => {
                tracing::warn!(
                    transaction_id = %transaction.id,
                    rate = %rate,
                    frequency = n,
                    days,
                    "compound growth not representable, accruing nothing"
                );
                transaction.amount
            }
        };

        CompoundInterest {
            interest_amount: total - transaction.amount,
            total_with_interest: total,
            days_elapsed: days,
            interest_rate: rate.as_percentage(),
            frequency: n,
        }
    }
}

/// future value of `principal` after `days` at `rate` compounded `n` times a year
pub fn compound_total(principal: Money, rate: Rate, n: u32, days: u32) -> Option<Money> {
    let periodic_rate = rate.periodic(n)?;
    let years = Decimal::from(days) / dec!(365);
    let periods = Decimal::from(n).checked_mul(years)?;
    principal.grow(periodic_rate, periods)
}
