use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::decimal::Money;
use crate::types::{PersonId, Transaction};

/// principal-only balance with one counterparty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonBalance {
    pub total_received: Money,
    pub total_given: Money,
    /// received minus given
    pub balance: Money,
    pub transaction_count: usize,
}

impl PersonBalance {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut result = Self::default();
        for tx in transactions {
            if tx.is_money_received {
                result.total_received += tx.amount;
            } else {
                result.total_given += tx.amount;
            }
            result.transaction_count += 1;
        }
        result.balance = result.total_received - result.total_given;
        result
    }
}

/// how counterparties are ranked by `top_people`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    /// net received minus given
    #[default]
    Balance,
    /// total the owner paid out to them
    Given,
    /// total they paid the owner
    Received,
}

/// one counterparty's total under a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonTotal {
    pub person_id: PersonId,
    pub person_name: Option<String>,
    pub total: Money,
}

/// the `limit` counterparties with the largest totals under `ranking`.
/// ties keep first-appearance order.
pub fn top_people<'a, I>(transactions: I, ranking: Ranking, limit: usize) -> Vec<PersonTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<PersonId, usize> = HashMap::new();
    let mut totals: Vec<PersonTotal> = Vec::new();

    for tx in transactions {
        let contribution = match ranking {
            Ranking::Balance => tx.amount.signed(tx.is_money_received),
            Ranking::Given if !tx.is_money_received => tx.amount,
            Ranking::Received if tx.is_money_received => tx.amount,
            _ => continue,
        };

        let slot = *index.entry(tx.person_id).or_insert_with(|| {
            totals.push(PersonTotal {
                person_id: tx.person_id,
                person_name: tx.person_name.clone(),
                total: Money::ZERO,
            });
            totals.len() - 1
        });
        totals[slot].total += contribution;
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}
