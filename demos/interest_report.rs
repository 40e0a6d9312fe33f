//! interest report - accrue interest across a small ledger with controlled time
use chrono::{Duration, TimeZone, Utc};
use ledger_interest_rs::interest::frequency;
use ledger_interest_rs::{
    AccrualEngine, InterestDefaults, InterestReport, InterestType, LedgerStats, Money,
    Person, PersonInterestReport, Rate, SafeTimeProvider, TimeSource, Transaction,
    TransactionFilter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== interest report ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let engine = AccrualEngine::new(InterestDefaults::from_env()?);

    let vinay = Person::new("Vinay");
    let chinni = Person::new("Chinni");

    let ledger = vec![
        Transaction::builder()
            .person(&vinay)
            .amount(Money::from_major(5_000))
            .given()
            .date(time.now())
            .interest(InterestType::Simple)
            .rate(Rate::from_percentage(24))
            .description("hand loan")
            .build()?,
        Transaction::builder()
            .person(&vinay)
            .amount(Money::from_major(1_500))
            .received()
            .date(time.now() + Duration::days(90))
            .build()?,
        Transaction::builder()
            .person(&chinni)
            .amount(Money::from_major(20_000))
            .given()
            .date(time.now())
            .interest(InterestType::Compound)
            .rate(Rate::from_percentage(18))
            .compound_frequency(frequency::MONTHLY)
            .build()?,
    ];

    // one year on
    controller.advance(Duration::days(366));
    println!("as of {}\n", time.now().format("%Y-%m-%d"));

    let report = InterestReport::filtered(
        &engine,
        &ledger,
        &TransactionFilter::interest_bearing(),
        time.now(),
    )?;
    println!("interest-bearing transactions:");
    println!("{}\n", report.to_json_pretty()?);

    let people = PersonInterestReport::build(&engine, &ledger, time.now());
    for person in people.person_summary.iter() {
        println!(
            "{}: principal {} simple {} compound {}",
            person.person_name.as_deref().unwrap_or("unknown"),
            person.total_principal,
            person.total_with_simple_interest.round_dp(2),
            person.total_with_compound_interest.round_dp(2),
        );
    }

    let stats = LedgerStats::compute(&ledger, time.now() - Duration::days(180));
    println!("\nnet balance: {}", stats.balance);

    Ok(())
}
