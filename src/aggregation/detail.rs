use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::AccrualEngine;
use crate::types::{InterestType, PersonId, Transaction, TransactionId};

/// one transaction with both accrual branches evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub transaction_id: TransactionId,
    pub person_id: PersonId,
    pub person_name: Option<String>,
    pub amount: Money,
    pub transaction_date: DateTime<Utc>,
    pub is_money_received: bool,
    /// taken from the simple branch
    pub days_elapsed: u32,
    pub interest_type: InterestType,
    /// declared rate, `None` when the transaction relies on the default
    #[serde(with = "crate::decimal::percent::option")]
    pub interest_rate: Option<Rate>,
    pub simple_interest: Money,
    pub simple_interest_total: Money,
    pub compound_interest: Money,
    pub compound_interest_total: Money,
}

impl TransactionDetail {
    pub fn from_transaction(
        engine: &AccrualEngine,
        transaction: &Transaction,
        as_of: DateTime<Utc>,
    ) -> Self {
        let interest = engine.calculate(transaction, as_of);

        Self {
            transaction_id: transaction.id,
            person_id: transaction.person_id,
            person_name: transaction.person_name.clone(),
            amount: transaction.amount,
            transaction_date: transaction.transaction_date,
            is_money_received: transaction.is_money_received,
            days_elapsed: interest.simple_interest.days_elapsed,
            interest_type: transaction.interest_type,
            interest_rate: transaction.interest_rate,
            simple_interest: interest.simple_interest.interest_amount,
            simple_interest_total: interest.simple_interest.total_with_interest,
            compound_interest: interest.compound_interest.interest_amount,
            compound_interest_total: interest.compound_interest.total_with_interest,
        }
    }
}

/// evaluate every transaction as of `as_of`, keeping the input order
pub fn per_transaction_detail<'a, I>(
    engine: &AccrualEngine,
    transactions: I,
    as_of: DateTime<Utc>,
) -> Vec<TransactionDetail>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|tx| TransactionDetail::from_transaction(engine, tx, as_of))
        .collect()
}
