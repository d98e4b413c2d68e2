use debt_payoff_rs::{
    calculate_debt_metrics, calculate_monthly_payment, calculate_months_remaining,
    calculate_progress_pct, from_monthly, to_monthly, DebtAccountBuilder, Decimal, Money,
    PaymentFrequency, Rate, SafeTimeProvider, TimeSource,
};
use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn frequency() -> impl Strategy<Value = PaymentFrequency> {
    prop::sample::select(PaymentFrequency::ALL.to_vec())
}

fn time() -> SafeTimeProvider {
    SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ))
}

proptest! {
    #[test]
    fn frequency_conversion_round_trips(cents in 0i64..1_000_000_000, frequency in frequency()) {
        let amount = Money::from_cents(cents);
        let back = to_monthly(from_monthly(amount, frequency), frequency);
        prop_assert!((back - amount).abs().as_decimal() < Decimal::new(1, 9));
    }

    #[test]
    fn interest_free_payment_is_linear(cents in 1i64..100_000_000, months in 1u32..600) {
        let principal = Money::from_cents(cents);
        let payment = calculate_monthly_payment(principal, Rate::ZERO, months);
        prop_assert_eq!(payment, principal / Decimal::from(months));
    }

    #[test]
    fn progress_is_monotonic_and_capped(
        initial in 1i64..1_000_000,
        down_share in 0i64..100,
        paid_a in 0i64..1_000_000,
        paid_b in 0i64..1_000_000,
    ) {
        let initial_amount = Money::from_major(initial);
        let down_payment = Money::from_major(initial * down_share / 100);
        let (low, high) = if paid_a <= paid_b { (paid_a, paid_b) } else { (paid_b, paid_a) };

        let low_pct = calculate_progress_pct(initial_amount, down_payment, Money::from_major(low));
        let high_pct = calculate_progress_pct(initial_amount, down_payment, Money::from_major(high));

        prop_assert!(low_pct <= high_pct);
        prop_assert!(high_pct <= Decimal::from(100));
        prop_assert!(low_pct >= Decimal::ZERO);
    }

    #[test]
    fn underwater_payments_have_no_payoff_estimate(
        balance in 1_000i64..1_000_000,
        apr in 1u32..40,
        shortfall_pct in 0i64..100,
    ) {
        let rate = Rate::from_percentage(apr);
        let interest = Money::from_major(balance).interest_at(rate.monthly_rate());
        let payment = (interest * Decimal::new(100 - shortfall_pct, 2)).round_dp(2).min(interest);

        let debt = DebtAccountBuilder::credit_card(Money::from_major(balance), rate, payment)
            .first_payment_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build_with_time(&time())
            .unwrap();

        prop_assert_eq!(calculate_months_remaining(&debt), None);
    }

    #[test]
    fn metrics_are_deterministic(
        amount in 1_000i64..500_000,
        apr in 0u32..30,
        term in 1u32..360,
        months_ago in 0u32..400,
    ) {
        let first_payment = NaiveDate::from_ymd_opt(2000, 1, 10).unwrap();
        let as_of = first_payment.checked_add_months(chrono::Months::new(months_ago)).unwrap();
        let debt = DebtAccountBuilder::auto_loan(Money::from_major(amount), Rate::from_percentage(apr), term)
            .first_payment_date(first_payment)
            .build_with_time(&time())
            .unwrap();

        let first = calculate_debt_metrics(&debt, as_of);
        let second = calculate_debt_metrics(&debt, as_of);
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.remaining_balance.is_negative());
        prop_assert!(first.progress_pct <= Decimal::from(100));
    }
}
