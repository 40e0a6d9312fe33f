//! serializable interest reports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregation::{
    global_summary, per_person_summary, per_transaction_detail, GlobalSummary, PersonSummaries,
    TransactionDetail,
};
use crate::errors::Result;
use crate::filter::TransactionFilter;
use crate::interest::{AccrualEngine, InterestBreakdown};
use crate::types::Transaction;

/// every selected transaction with its accruals, plus the net summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestReport {
    pub as_of: DateTime<Utc>,
    pub transactions: Vec<TransactionDetail>,
    pub summary: GlobalSummary,
}

impl InterestReport {
    pub fn build<'a, I>(engine: &AccrualEngine, transactions: I, as_of: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let transactions = per_transaction_detail(engine, transactions, as_of);
        let summary = global_summary(&transactions);
        Self {
            as_of,
            transactions,
            summary,
        }
    }

    /// report over the transactions `filter` selects
    pub fn filtered(
        engine: &AccrualEngine,
        transactions: &[Transaction],
        filter: &TransactionFilter,
        as_of: DateTime<Utc>,
    ) -> Result<Self> {
        filter.validate()?;
        Ok(Self::build(engine, filter.apply(transactions), as_of))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// interest summary grouped by counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonInterestReport {
    pub as_of: DateTime<Utc>,
    pub person_summary: PersonSummaries,
}

impl PersonInterestReport {
    pub fn build<'a, I>(engine: &AccrualEngine, transactions: I, as_of: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let details = per_transaction_detail(engine, transactions, as_of);
        Self {
            as_of,
            person_summary: per_person_summary(&details),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// a single transaction next to its accruals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInterestView {
    pub transaction: Transaction,
    pub interest_details: InterestBreakdown,
}

impl TransactionInterestView {
    pub fn new(engine: &AccrualEngine, transaction: &Transaction, as_of: DateTime<Utc>) -> Self {
        Self {
            transaction: transaction.clone(),
            interest_details: engine.calculate(transaction, as_of),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::{InterestType, Person};
    use chrono::TimeZone;
    use serde_json::Value;

    fn ledger() -> (Person, Person, Vec<Transaction>) {
        let ravi = Person::new("Ravi");
        let lokesh = Person::new("Lokesh");
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let transactions = vec![
            Transaction::builder()
                .person(&ravi)
                .amount(Money::from_major(1_000))
                .given()
                .date(date)
                .interest(InterestType::Simple)
                .rate(Rate::from_percentage(24))
                .build()
                .unwrap(),
            Transaction::builder()
                .person(&lokesh)
                .amount(Money::from_major(300))
                .received()
                .date(date)
                .build()
                .unwrap(),
        ];
        (ravi, lokesh, transactions)
    }

    #[test]
    fn test_filtered_report_keeps_interest_bearing() {
        let engine = AccrualEngine::default();
        let (ravi, _, transactions) = ledger();
        let as_of = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        let report = InterestReport::filtered(
            &engine,
            &transactions,
            &TransactionFilter::interest_bearing(),
            as_of,
        )
        .unwrap();

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].person_id, ravi.id);
        assert_eq!(report.summary.total_principal, Money::from_major(-1_000));
        assert_eq!(report.summary.total_simple_interest, Money::from_major(-240));
        assert_eq!(report.summary.total_with_simple_interest, Money::from_major(-1_240));
    }

    #[test]
    fn test_report_json_shape() {
        let engine = AccrualEngine::default();
        let (_, _, transactions) = ledger();
        let as_of = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        let report = InterestReport::build(&engine, &transactions, as_of);
        let json: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["transaction_count"], 2);
        assert_eq!(json["transactions"][0]["interest_type"], "simple");
        assert_eq!(json["transactions"][1]["interest_rate"], Value::Null);
    }

    #[test]
    fn test_person_report() {
        let engine = AccrualEngine::default();
        let (ravi, lokesh, transactions) = ledger();
        let as_of = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        let report = PersonInterestReport::build(&engine, &transactions, as_of);
        assert_eq!(report.person_summary.person_ids(), vec![ravi.id, lokesh.id]);

        let json: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        let people = json["person_summary"].as_array().unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[1]["person_name"], "Lokesh");
        assert_eq!(people[1]["transaction_count"], 1);
    }

    #[test]
    fn test_inverted_filter_rejected() {
        let engine = AccrualEngine::default();
        let (_, _, transactions) = ledger();
        let mut filter = TransactionFilter::new();
        filter.start_date = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        filter.end_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let result = InterestReport::filtered(&engine, &transactions, &filter, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_view() {
        let engine = AccrualEngine::default();
        let (_, _, transactions) = ledger();
        let as_of = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        let view = TransactionInterestView::new(&engine, &transactions[0], as_of);
        assert_eq!(view.interest_details.simple_interest.interest_amount, Money::from_major(240));

        let json: Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["interest_details"]["simple_interest"]["days_elapsed"], 365);
    }
}
