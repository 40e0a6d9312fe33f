use chrono::{DateTime, Duration, TimeZone, Utc};
use ledger_interest_rs::interest::frequency;
use ledger_interest_rs::{
    global_summary, per_person_summary, per_transaction_detail, AccrualEngine, InterestType,
    Money, Person, Rate, Transaction, Uuid,
};
use proptest::prelude::*;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

/// Whole-unit principal from 100 to 1,000,000.
fn arb_amount() -> impl Strategy<Value = Money> {
    (100i64..1_000_000i64).prop_map(Money::from_major)
}

/// Annual rate from 1% to 36%.
fn arb_rate() -> impl Strategy<Value = Rate> {
    (1u32..=36u32).prop_map(Rate::from_percentage)
}

fn arb_frequency() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![
        frequency::ANNUAL,
        frequency::SEMI_ANNUAL,
        frequency::QUARTERLY,
        frequency::MONTHLY,
        frequency::WEEKLY,
        frequency::DAILY,
    ])
}

fn arb_interest_type() -> impl Strategy<Value = InterestType> {
    prop::sample::select(vec![InterestType::Simple, InterestType::Compound])
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (arb_amount(), arb_rate(), arb_frequency(), arb_interest_type(), any::<bool>()).prop_map(
        |(amount, rate, n, kind, received)| {
            let builder = Transaction::builder()
                .person_id(Uuid::new_v4())
                .amount(amount)
                .date(origin())
                .interest(kind)
                .rate(rate)
                .compound_frequency(n);
            let builder = if received { builder.received() } else { builder.given() };
            builder.build().unwrap()
        },
    )
}

/// A small pool of counterparties so groups get more than one transaction.
fn arb_ledger() -> impl Strategy<Value = Vec<Transaction>> {
    let people = vec![Person::new("A"), Person::new("B"), Person::new("C")];
    prop::collection::vec((arb_transaction(), 0usize..3, 0i64..2_000), 1..30).prop_map(
        move |rows| {
            rows.into_iter()
                .map(|(mut tx, who, offset)| {
                    tx.person_id = people[who].id;
                    tx.person_name = Some(people[who].name.clone());
                    tx.transaction_date = origin() + Duration::days(offset);
                    tx
                })
                .collect()
        },
    )
}

proptest! {
    // ===================================================================
    // Nothing accrues on or before the transaction date.
    // ===================================================================
    #[test]
    fn zero_days_accrue_nothing(tx in arb_transaction(), back in 0i64..3_650) {
        let engine = AccrualEngine::default();
        let as_of = tx.transaction_date - Duration::days(back);

        let simple = engine.simple_interest(&tx, as_of);
        let compound = engine.compound_interest(&tx, as_of);

        prop_assert_eq!(simple.interest_amount, Money::ZERO);
        prop_assert_eq!(simple.total_with_interest, tx.amount);
        prop_assert_eq!(simple.days_elapsed, 0);
        prop_assert_eq!(compound.interest_amount, Money::ZERO);
        prop_assert_eq!(compound.total_with_interest, tx.amount);
    }

    // ===================================================================
    // Switching interest off zeroes both branches whatever the policy says.
    // ===================================================================
    #[test]
    fn interest_off_zeroes_both(mut tx in arb_transaction(), days in 0i64..5_000) {
        tx.apply_interest = false;
        let engine = AccrualEngine::default();

        let result = engine.calculate(&tx, tx.transaction_date + Duration::days(days));

        prop_assert_eq!(result.simple_interest.interest_amount, Money::ZERO);
        prop_assert_eq!(result.simple_interest.days_elapsed, 0);
        prop_assert_eq!(result.compound_interest.interest_amount, Money::ZERO);
        prop_assert_eq!(result.compound_interest.days_elapsed, 0);
        prop_assert_eq!(result.compound_interest.frequency, 0);
    }

    // ===================================================================
    // Accrual never shrinks as the as-of date moves forward.
    // ===================================================================
    #[test]
    fn accrual_is_monotonic(tx in arb_transaction(), first in 0i64..3_650, step in 1i64..400) {
        let engine = AccrualEngine::default();
        let earlier = engine.calculate(&tx, tx.transaction_date + Duration::days(first));
        let later = engine.calculate(&tx, tx.transaction_date + Duration::days(first + step));

        prop_assert!(later.simple_interest.interest_amount >= earlier.simple_interest.interest_amount);
        prop_assert!(later.compound_interest.interest_amount >= earlier.compound_interest.interest_amount);
    }

    // ===================================================================
    // From one year on, compounding earns at least as much as simple.
    // ===================================================================
    #[test]
    fn compound_at_least_simple_after_a_year(tx in arb_transaction(), days in 365i64..3_650) {
        let engine = AccrualEngine::default();
        let result = engine.calculate(&tx, tx.transaction_date + Duration::days(days));

        prop_assert!(
            result.compound_interest.interest_amount >= result.simple_interest.interest_amount,
            "compound {} must be >= simple {}",
            result.compound_interest.interest_amount,
            result.simple_interest.interest_amount
        );
    }

    // ===================================================================
    // Identical inputs give identical outputs.
    // ===================================================================
    #[test]
    fn calculation_is_deterministic(tx in arb_transaction(), days in 0i64..5_000) {
        let engine = AccrualEngine::default();
        let as_of = tx.transaction_date + Duration::days(days);
        prop_assert_eq!(engine.calculate(&tx, as_of), engine.calculate(&tx, as_of));
    }

    // ===================================================================
    // Net principal is received minus given, and per-person totals add up
    // to the global totals.
    // ===================================================================
    #[test]
    fn summaries_follow_sign_convention(ledger in arb_ledger(), days in 0i64..3_000) {
        let engine = AccrualEngine::default();
        let as_of = origin() + Duration::days(days);
        let details = per_transaction_detail(&engine, &ledger, as_of);

        let global = global_summary(&details);
        let people = per_person_summary(&details);

        let received: Money = ledger.iter().filter(|t| t.is_money_received).map(|t| t.amount).sum();
        let given: Money = ledger.iter().filter(|t| !t.is_money_received).map(|t| t.amount).sum();
        prop_assert_eq!(global.total_principal, received - given);
        prop_assert_eq!(global.transaction_count, ledger.len());
        prop_assert_eq!(
            global.total_with_simple_interest,
            global.total_principal + global.total_simple_interest
        );

        let person_principal: Money = people.iter().map(|p| p.total_principal).sum();
        let person_simple: Money = people.iter().map(|p| p.total_simple_interest).sum();
        let person_count: usize = people.iter().map(|p| p.transaction_count).sum();
        prop_assert_eq!(person_principal, global.total_principal);
        prop_assert_eq!(person_simple, global.total_simple_interest);
        prop_assert_eq!(person_count, ledger.len());
    }
}
