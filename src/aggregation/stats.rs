use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregation::balance::{top_people, PersonTotal, Ranking};
use crate::decimal::Money;
use crate::types::{Transaction, TransactionId};

const TOP_COUNTERPARTIES: usize = 3;
const RECENT_TRANSACTIONS: usize = 5;

/// principal moved in one calendar month in one direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// first day of the month
    pub month: NaiveDate,
    pub is_money_received: bool,
    pub total: Money,
}

/// dashboard figures over the owner's whole ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_given: Money,
    pub total_received: Money,
    pub given_count: usize,
    pub received_count: usize,
    /// received minus given
    pub balance: Money,
    /// people who paid the owner the most
    pub top_creditors: Vec<PersonTotal>,
    /// people the owner paid the most
    pub top_debtors: Vec<PersonTotal>,
    /// newest first
    pub recent_transactions: Vec<TransactionId>,
    /// transactions dated on or after `since`, oldest month first
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl LedgerStats {
    pub fn compute(transactions: &[Transaction], since: DateTime<Utc>) -> Self {
        let mut total_given = Money::ZERO;
        let mut total_received = Money::ZERO;
        let mut given_count = 0;
        let mut received_count = 0;
        let mut monthly: BTreeMap<(NaiveDate, bool), Money> = BTreeMap::new();

        for tx in transactions {
            if tx.is_money_received {
                total_received += tx.amount;
                received_count += 1;
            } else {
                total_given += tx.amount;
                given_count += 1;
            }

            if tx.transaction_date >= since {
                *monthly
                    .entry((month_start(tx.transaction_date), tx.is_money_received))
                    .or_default() += tx.amount;
            }
        }

        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));

        Self {
            total_given,
            total_received,
            given_count,
            received_count,
            balance: total_received - total_given,
            top_creditors: top_people(transactions, Ranking::Received, TOP_COUNTERPARTIES),
            top_debtors: top_people(transactions, Ranking::Given, TOP_COUNTERPARTIES),
            recent_transactions: recent
                .into_iter()
                .take(RECENT_TRANSACTIONS)
                .map(|tx| tx.id)
                .collect(),
            monthly_totals: monthly
                .into_iter()
                .map(|((month, is_money_received), total)| MonthlyTotal {
                    month,
                    is_money_received,
                    total,
                })
                .collect(),
        }
    }
}

fn month_start(date: DateTime<Utc>) -> NaiveDate {
    let day = date.date_naive();
    day.with_day(1).unwrap_or(day)
}
