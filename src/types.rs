use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// unique identifier for a ledger transaction
pub type TransactionId = Uuid;

/// unique identifier for a counterparty
pub type PersonId = Uuid;

/// declared interest policy of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    Compound,
    #[default]
    None,
}

/// a named counterparty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
        }
    }
}

/// money moved between the ledger owner and a counterparty, already joined
/// with the counterparty's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub person_id: PersonId,
    pub person_name: Option<String>,
    pub amount: Money,
    /// true when the counterparty paid the owner
    pub is_money_received: bool,
    pub transaction_date: DateTime<Utc>,
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    pub is_settled: bool,
    /// when to nudge the counterparty about an open balance
    #[serde(default)]
    pub reminder_date: Option<DateTime<Utc>>,

    // interest policy
    pub apply_interest: bool,
    pub interest_type: InterestType,
    #[serde(with = "crate::decimal::percent::option", default)]
    pub interest_rate: Option<Rate>,
    #[serde(default)]
    pub compound_frequency: Option<u32>,
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::new()
    }

    /// true when the transaction accrues interest at all
    pub fn bears_interest(&self) -> bool {
        self.apply_interest && self.interest_type != InterestType::None
    }

    /// boundary check for values entering the ledger. the calculator itself
    /// accepts whatever it is handed.
    pub fn validate(&self) -> Result<()> {
        if self.amount.is_negative() {
            return Err(LedgerError::NegativeAmount { amount: self.amount });
        }
        if let Some(rate) = self.interest_rate {
            if rate.is_negative() {
                return Err(LedgerError::InvalidInterestRate { rate });
            }
        }
        if let Some(0) = self.compound_frequency {
            return Err(LedgerError::InvalidCompoundFrequency { frequency: 0 });
        }
        Ok(())
    }

    /// apply a partial change to the interest policy
    pub fn apply_policy_update(&mut self, update: &InterestPolicyUpdate) -> Result<()> {
        let mut next = self.clone();
        if let Some(apply) = update.apply_interest {
            next.apply_interest = apply;
        }
        if let Some(kind) = update.interest_type {
            next.interest_type = kind;
        }
        if let Some(rate) = update.interest_rate {
            next.interest_rate = rate;
        }
        if let Some(frequency) = update.compound_frequency {
            next.compound_frequency = frequency;
        }
        next.validate()?;

        tracing::debug!(
            transaction_id = %self.id,
            apply_interest = next.apply_interest,
            interest_type = ?next.interest_type,
            "interest policy updated"
        );
        *self = next;
        Ok(())
    }
}

/// partial update of a transaction's interest policy. the outer `Option` means
/// "leave unchanged"; for rate and frequency `Some(None)` clears the value so
/// the configured default applies again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestPolicyUpdate {
    pub apply_interest: Option<bool>,
    pub interest_type: Option<InterestType>,
    pub interest_rate: Option<Option<Rate>>,
    pub compound_frequency: Option<Option<u32>>,
}

pub struct TransactionBuilder {
    id: Option<TransactionId>,
    person_id: Option<PersonId>,
    person_name: Option<String>,
    amount: Option<Money>,
    is_money_received: Option<bool>,
    transaction_date: Option<DateTime<Utc>>,
    description: Option<String>,
    category: Option<String>,
    payment_method: Option<String>,
    is_settled: bool,
    reminder_date: Option<DateTime<Utc>>,
    apply_interest: Option<bool>,
    interest_type: InterestType,
    interest_rate: Option<Rate>,
    compound_frequency: Option<u32>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            person_id: None,
            person_name: None,
            amount: None,
            is_money_received: None,
            transaction_date: None,
            description: None,
            category: None,
            payment_method: None,
            is_settled: false,
            reminder_date: None,
            apply_interest: None,
            interest_type: InterestType::None,
            interest_rate: None,
            compound_frequency: None,
        }
    }

    pub fn id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn person(mut self, person: &Person) -> Self {
        self.person_id = Some(person.id);
        self.person_name = Some(person.name.clone());
        self
    }

    pub fn person_id(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// counterparty paid the owner
    pub fn received(mut self) -> Self {
        self.is_money_received = Some(true);
        self
    }

    /// owner paid the counterparty
    pub fn given(mut self) -> Self {
        self.is_money_received = Some(false);
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.transaction_date = Some(date);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    pub fn settled(mut self, settled: bool) -> Self {
        self.is_settled = settled;
        self
    }

    pub fn reminder_date(mut self, reminder_date: DateTime<Utc>) -> Self {
        self.reminder_date = Some(reminder_date);
        self
    }

    /// turn interest on with the given policy; rate falls back to the configured default
    pub fn interest(mut self, interest_type: InterestType) -> Self {
        self.interest_type = interest_type;
        self
    }

    /// override the interest switch, which otherwise follows the declared type
    pub fn apply_interest(mut self, apply: bool) -> Self {
        self.apply_interest = Some(apply);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn compound_frequency(mut self, periods_per_year: u32) -> Self {
        self.compound_frequency = Some(periods_per_year);
        self
    }

    pub fn build(self) -> Result<Transaction> {
        let transaction = Transaction {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            person_id: self.person_id.ok_or(LedgerError::MissingField { field: "person_id" })?,
            person_name: self.person_name,
            amount: self.amount.ok_or(LedgerError::MissingField { field: "amount" })?,
            is_money_received: self
                .is_money_received
                .ok_or(LedgerError::MissingField { field: "is_money_received" })?,
            transaction_date: self
                .transaction_date
                .ok_or(LedgerError::MissingField { field: "transaction_date" })?,
            description: self.description,
            category: self.category,
            payment_method: self.payment_method,
            is_settled: self.is_settled,
            reminder_date: self.reminder_date,
            apply_interest: self
                .apply_interest
                .unwrap_or(self.interest_type != InterestType::None),
            interest_type: self.interest_type,
            interest_rate: self.interest_rate,
            compound_frequency: self.compound_frequency,
        };
        transaction.validate()?;
        Ok(transaction)
    }
}
