use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::aggregation::detail::TransactionDetail;
use crate::decimal::Money;
use crate::types::PersonId;

/// running totals under the owner's sign convention: received adds, given
/// subtracts. positive means counterparties owe the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct NetTotals {
    principal: Money,
    simple_interest: Money,
    compound_interest: Money,
}

impl NetTotals {
    fn apply(&mut self, detail: &TransactionDetail) {
        let received = detail.is_money_received;
        self.principal += detail.amount.signed(received);
        self.simple_interest += detail.simple_interest.signed(received);
        self.compound_interest += detail.compound_interest.signed(received);
    }
}

/// net totals across every detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_principal: Money,
    pub total_simple_interest: Money,
    pub total_with_simple_interest: Money,
    pub total_compound_interest: Money,
    pub total_with_compound_interest: Money,
    pub transaction_count: usize,
}

pub fn global_summary(details: &[TransactionDetail]) -> GlobalSummary {
    let mut totals = NetTotals::default();
    for detail in details {
        totals.apply(detail);
    }
    tracing::trace!(count = details.len(), principal = %totals.principal, "global summary");

    GlobalSummary {
        total_principal: totals.principal,
        total_simple_interest: totals.simple_interest,
        total_with_simple_interest: totals.principal + totals.simple_interest,
        total_compound_interest: totals.compound_interest,
        total_with_compound_interest: totals.principal + totals.compound_interest,
        transaction_count: details.len(),
    }
}

/// net totals for one counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person_id: PersonId,
    pub person_name: Option<String>,
    pub transactions: Vec<TransactionDetail>,
    pub total_principal: Money,
    pub total_simple_interest: Money,
    pub total_compound_interest: Money,
    pub total_with_simple_interest: Money,
    pub total_with_compound_interest: Money,
    pub transaction_count: usize,
}

/// per-person summaries keyed by person, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonSummaries {
    summaries: Vec<PersonSummary>,
}

impl PersonSummaries {
    pub fn get(&self, person_id: &PersonId) -> Option<&PersonSummary> {
        self.summaries.iter().find(|s| &s.person_id == person_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonSummary> {
        self.summaries.iter()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        self.summaries.iter().map(|s| s.person_id).collect()
    }

    pub fn into_vec(self) -> Vec<PersonSummary> {
        self.summaries
    }
}

impl IntoIterator for PersonSummaries {
    type Item = PersonSummary;
    type IntoIter = std::vec::IntoIter<PersonSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.summaries.into_iter()
    }
}

pub fn per_person_summary(details: &[TransactionDetail]) -> PersonSummaries {
    let mut index: HashMap<PersonId, usize> = HashMap::new();
    let mut groups: Vec<(PersonId, Option<String>, Vec<TransactionDetail>, NetTotals)> = Vec::new();

    for detail in details {
        let slot = *index.entry(detail.person_id).or_insert_with(|| {
            groups.push((
                detail.person_id,
                detail.person_name.clone(),
                Vec::new(),
                NetTotals::default(),
            ));
            groups.len() - 1
        });

        let (_, _, transactions, totals) = &mut groups[slot];
        totals.apply(detail);
        transactions.push(detail.clone());
    }

    let summaries = groups
        .into_iter()
        .map(|(person_id, person_name, transactions, totals)| PersonSummary {
            person_id,
            person_name,
            transaction_count: transactions.len(),
            transactions,
            total_principal: totals.principal,
            total_simple_interest: totals.simple_interest,
            total_compound_interest: totals.compound_interest,
            total_with_simple_interest: totals.principal + totals.simple_interest,
            total_with_compound_interest: totals.principal + totals.compound_interest,
        })
        .collect();

    PersonSummaries { summaries }
}
