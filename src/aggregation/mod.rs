pub mod balance;
pub mod detail;
pub mod stats;
pub mod summary;

pub use balance::{top_people, PersonBalance, PersonTotal, Ranking};
pub use detail::{per_transaction_detail, TransactionDetail};
pub use stats::{LedgerStats, MonthlyTotal};
pub use summary::{global_summary, per_person_summary, GlobalSummary, PersonSummaries, PersonSummary};
