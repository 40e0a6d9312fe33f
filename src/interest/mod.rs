pub mod accrual;
pub mod compound;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InterestDefaults;
use crate::decimal::Money;
use crate::types::Transaction;

pub use accrual::{days_elapsed, SimpleInterestEngine};
pub use compound::{compound_total, frequency, CompoundInterestEngine};

/// simple accrual for one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterest {
    pub interest_amount: Money,
    pub total_with_interest: Money,
    pub days_elapsed: u32,
    /// annual rate as a percentage
    pub interest_rate: Decimal,
}

impl SimpleInterest {
    fn zeroed(total_with_interest: Money) -> Self {
        Self {
            interest_amount: Money::ZERO,
            total_with_interest,
            days_elapsed: 0,
            interest_rate: Decimal::ZERO,
        }
    }
}

/// compound accrual for one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterest {
    pub interest_amount: Money,
    pub total_with_interest: Money,
    pub days_elapsed: u32,
    /// annual rate as a percentage
    pub interest_rate: Decimal,
    /// compounding periods per year
    pub frequency: u32,
}

impl CompoundInterest {
    fn zeroed(total_with_interest: Money) -> Self {
        Self {
            interest_amount: Money::ZERO,
            total_with_interest,
            days_elapsed: 0,
            interest_rate: Decimal::ZERO,
            frequency: 0,
        }
    }
}

/// both accrual branches for one transaction, side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    pub simple_interest: SimpleInterest,
    pub compound_interest: CompoundInterest,
}

impl InterestBreakdown {
    /// no accrual at all, with `principal` carried as the total
    pub fn zeroed(principal: Money) -> Self {
        Self {
            simple_interest: SimpleInterest::zeroed(principal),
            compound_interest: CompoundInterest::zeroed(principal),
        }
    }
}

/// accrual calculator combining the simple and compound engines under one
/// set of configured defaults
#[derive(Debug, Clone, Copy)]
pub struct AccrualEngine {
    defaults: InterestDefaults,
    simple: SimpleInterestEngine,
    compound: CompoundInterestEngine,
}

impl Default for AccrualEngine {
    fn default() -> Self {
        Self::new(InterestDefaults::default())
    }
}

impl AccrualEngine {
    pub fn new(defaults: InterestDefaults) -> Self {
        Self {
            defaults,
            simple: SimpleInterestEngine::new(defaults.default_simple_rate),
            compound: CompoundInterestEngine::new(
                defaults.default_compound_rate,
                defaults.default_compound_frequency,
            ),
        }
    }

    /// the fallback policy this engine was built with
    pub fn defaults(&self) -> &InterestDefaults {
        &self.defaults
    }

    /// raw simple accrual, ignoring the transaction's interest switch
    pub fn simple_interest(&self, transaction: &Transaction, as_of: DateTime<Utc>) -> SimpleInterest {
        self.simple.calculate(transaction, as_of)
    }

    /// raw compound accrual, ignoring the transaction's interest switch
    pub fn compound_interest(
        &self,
        transaction: &Transaction,
        as_of: DateTime<Utc>,
    ) -> CompoundInterest {
        self.compound.calculate(transaction, as_of)
    }

    /// accrue both branches for a transaction that may be absent.
    ///
    /// a missing transaction yields a zeroed breakdown with a zero total.
    pub fn calculate_interest(
        &self,
        transaction: Option<&Transaction>,
        as_of: DateTime<Utc>,
    ) -> InterestBreakdown {
        match transaction {
            Some(transaction) => self.calculate(transaction, as_of),
            None => InterestBreakdown::zeroed(Money::ZERO),
        }
    }

    /// accrue both branches regardless of the declared interest type, so
    /// callers can always show simple and compound next to each other.
    ///
    /// a transaction that does not bear interest gets both branches zeroed.
    pub fn calculate(&self, transaction: &Transaction, as_of: DateTime<Utc>) -> InterestBreakdown {
        tracing::debug!(
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            apply_interest = transaction.apply_interest,
            interest_type = ?transaction.interest_type,
            interest_rate = ?transaction.interest_rate,
            compound_frequency = ?transaction.compound_frequency,
            "calculating interest"
        );

        let simple_interest = self.simple_interest(transaction, as_of);
        let compound_interest = self.compound_interest(transaction, as_of);

        if !transaction.bears_interest() {
            return InterestBreakdown::zeroed(transaction.amount);
        }

        InterestBreakdown {
            simple_interest,
            compound_interest,
        }
    }

    /// accrue up to the provider's current time
    pub fn calculate_interest_now(
        &self,
        transaction: &Transaction,
        time: &SafeTimeProvider,
    ) -> InterestBreakdown {
        self.calculate(transaction, time.now())
    }
}
