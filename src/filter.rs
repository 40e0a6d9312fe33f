use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::types::{PersonId, Transaction};

/// selects transactions the way ledger queries scope them. every criterion
/// left unset matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub person_id: Option<PersonId>,
    /// inclusive
    pub start_date: Option<DateTime<Utc>>,
    /// inclusive
    pub end_date: Option<DateTime<Utc>>,
    pub is_settled: Option<bool>,
    pub is_money_received: Option<bool>,
    pub category: Option<String>,
    /// case-insensitive substring of the person name or description
    pub search: Option<String>,
    pub interest_only: bool,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// transactions with interest switched on, as interest reports use
    pub fn interest_bearing() -> Self {
        Self {
            interest_only: true,
            ..Self::default()
        }
    }

    pub fn person(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(LedgerError::InvalidDateRange { start, end });
        }
        self.start_date = Some(start);
        self.end_date = Some(end);
        Ok(self)
    }

    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn settled(mut self, settled: bool) -> Self {
        self.is_settled = Some(settled);
        self
    }

    pub fn received(mut self, received: bool) -> Self {
        self.is_money_received = Some(received);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(LedgerError::InvalidDateRange { start, end });
            }
        }
        Ok(())
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.person_id.is_some_and(|id| id != tx.person_id) {
            return false;
        }
        if self.start_date.is_some_and(|start| tx.transaction_date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.transaction_date > end) {
            return false;
        }
        if self.is_settled.is_some_and(|settled| settled != tx.is_settled) {
            return false;
        }
        if self
            .is_money_received
            .is_some_and(|received| received != tx.is_money_received)
        {
            return false;
        }
        if let Some(category) = &self.category {
            if tx.category.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !text_matches(tx, term) {
                return false;
            }
        }
        !self.interest_only || tx.apply_interest
    }

    pub fn apply<'a, I>(&'a self, transactions: I) -> impl Iterator<Item = &'a Transaction> + 'a
    where
        I: IntoIterator<Item = &'a Transaction>,
        I::IntoIter: 'a,
    {
        transactions.into_iter().filter(move |tx| self.matches(tx))
    }
}

fn text_matches(tx: &Transaction, term: &str) -> bool {
    let term = term.to_lowercase();
    [tx.person_name.as_deref(), tx.description.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&term))
}
