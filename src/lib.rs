pub mod aggregation;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod filter;
pub mod interest;
pub mod report;
pub mod types;

// re-export key types
pub use aggregation::{
    global_summary, per_person_summary, per_transaction_detail, top_people, GlobalSummary,
    LedgerStats, PersonBalance, PersonSummaries, PersonSummary, Ranking, TransactionDetail,
};
pub use config::InterestDefaults;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use filter::TransactionFilter;
pub use interest::{AccrualEngine, CompoundInterest, InterestBreakdown, SimpleInterest};
pub use report::{InterestReport, PersonInterestReport, TransactionInterestView};
pub use types::{
    InterestPolicyUpdate, InterestType, Person, PersonId, Transaction, TransactionBuilder,
    TransactionId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
