use chrono::{DateTime, Utc};

use crate::decimal::{Money, Rate};
use crate::interest::SimpleInterest;
use crate::types::Transaction;

const SECONDS_PER_DAY: i64 = 86_400;

/// whole days from `start` to `end` under actual/365, floored. negative when
/// `end` precedes `start`.
pub fn days_elapsed(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// positive day count for accrual, or `None` when nothing has accrued yet
pub(crate) fn accrual_days(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<u32> {
    let days = days_elapsed(start, end);
    if days <= 0 {
        return None;
    }
    Some(u32::try_from(days).unwrap_or(u32::MAX))
}

/// engine for simple (non-compounding) accrual
#[derive(Debug, Clone, Copy)]
pub struct SimpleInterestEngine {
    pub default_rate: Rate,
}

impl SimpleInterestEngine {
    pub fn new(default_rate: Rate) -> Self {
        Self { default_rate }
    }

    /// the transaction's own rate, or the default when it has none
    pub fn effective_rate(&self, transaction: &Transaction) -> Rate {
        transaction.interest_rate.unwrap_or(self.default_rate)
    }

    /// accrue `principal * rate * days / 365` from the transaction date to `as_of`
    pub fn calculate(&self, transaction: &Transaction, as_of: DateTime<Utc>) -> SimpleInterest {
        let rate = self.effective_rate(transaction);

        let Some(days) = accrual_days(transaction.transaction_date, as_of) else {
            return SimpleInterest {
                interest_amount: Money::ZERO,
                total_with_interest: transaction.amount,
                days_elapsed: 0,
                interest_rate: rate.as_percentage(),
            };
        };

        let interest = transaction.amount.apply_rate(rate, days);

        SimpleInterest {
            interest_amount: interest,
            total_with_interest: transaction.amount + interest,
            days_elapsed: days,
            interest_rate: rate.as_percentage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterestType;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn transaction(amount: i64, rate: Option<Rate>, date: DateTime<Utc>) -> Transaction {
        let mut builder = Transaction::builder()
            .person_id(Uuid::new_v4())
            .amount(Money::from_major(amount))
            .given()
            .date(date)
            .interest(InterestType::Simple);
        if let Some(rate) = rate {
            builder = builder.rate(rate);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_days_elapsed_floors() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(days_elapsed(start, start + Duration::hours(23)), 0);
        assert_eq!(days_elapsed(start, start + Duration::hours(25)), 1);
        assert_eq!(days_elapsed(start, start - Duration::hours(1)), -1);
        assert_eq!(days_elapsed(start, start + Duration::days(31)), 31);
    }

    #[test]
    fn test_days_across_leap_year() {
        let start = Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 7, 0, 0, 0).unwrap();
        assert_eq!(days_elapsed(start, end), 366);
    }

    #[test]
    fn test_simple_interest() {
        let engine = SimpleInterestEngine::new(Rate::from_percentage(12));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let tx = transaction(10_000, Some(Rate::from_percentage(5)), start);

        let result = engine.calculate(&tx, start + Duration::days(30));

        assert_eq!(result.days_elapsed, 30);
        assert_eq!(result.interest_amount.round_dp(2), Money::from_str_exact("41.10").unwrap());
        assert_eq!(result.total_with_interest, tx.amount + result.interest_amount);
        assert_eq!(result.interest_rate, dec!(5));
    }

    #[test]
    fn test_default_rate_fallback() {
        let engine = SimpleInterestEngine::new(Rate::from_percentage(12));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let tx = transaction(1_000, None, start);

        let result = engine.calculate(&tx, start + Duration::days(365));

        assert_eq!(result.interest_amount, Money::from_major(120));
        assert_eq!(result.interest_rate, dec!(12));
    }

    #[test]
    fn test_zero_rate_is_not_unset() {
        let engine = SimpleInterestEngine::new(Rate::from_percentage(12));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let tx = transaction(1_000, Some(Rate::ZERO), start);

        let result = engine.calculate(&tx, start + Duration::days(365));

        assert!(result.interest_amount.is_zero());
        assert_eq!(result.interest_rate, dec!(0));
    }

    #[test]
    fn test_future_dated_transaction() {
        let engine = SimpleInterestEngine::new(Rate::from_percentage(12));
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let tx = transaction(1_000, Some(Rate::from_percentage(24)), start);

        let result = engine.calculate(&tx, start - Duration::days(10));

        assert_eq!(result.interest_amount, Money::ZERO);
        assert_eq!(result.total_with_interest, tx.amount);
        assert_eq!(result.days_elapsed, 0);
        assert_eq!(result.interest_rate, dec!(24));
    }
}
