use chrono::{Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use debt_payoff_rs::{
    calculate_debt_metrics, calculate_debt_metrics_now, calculate_next_payment_dates,
    calculate_payments_from_date, generate_payoff_schedule, DebtAccount, DebtAccountBuilder,
    Money, PaymentFrequency, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn money(s: &str) -> Money {
    Money::from_str_exact(s).unwrap()
}

#[test]
fn car_loan_two_months_in() {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap(),
    ));
    let now = time.now().date_naive();
    let first_payment = now.checked_sub_months(Months::new(2)).unwrap();

    let debt = DebtAccountBuilder::auto_loan(Money::from_major(12_000), Rate::from_percentage(6), 24)
        .first_payment_date(first_payment)
        .build_with_time(&time)
        .unwrap();
    assert_eq!(debt.monthly_payment, money("531.85"));

    let progress = calculate_payments_from_date(&debt, now);
    assert_eq!(progress.months_paid, 2);

    // month 1: 60.00 interest, 471.85 principal; month 2: 57.64075 interest
    assert_eq!(progress.interest_paid, money("117.64"));
    assert_eq!(progress.principal_paid, money("946.06"));
    assert_eq!(progress.current_balance, money("11053.94"));

    let metrics = calculate_debt_metrics_now(&debt, &time);
    assert_eq!(metrics.remaining_balance, progress.current_balance);
    assert_eq!(metrics.months_remaining, Some(22));

    let schedule = generate_payoff_schedule(&debt, now);
    assert_eq!(schedule.payments.len(), 22);
    assert_eq!(schedule.total_interest, metrics.total_interest_remaining);
    assert_eq!(schedule.payments[0].payment_date.day(), first_payment.day());
}

#[test]
fn stored_record_round_trips_through_json_and_metrics() {
    let json = r#"{
        "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
        "name": "Boat",
        "initialAmount": 20000,
        "downPayment": 2000,
        "interestRate": 7.25,
        "totalMonths": 60,
        "firstPaymentDate": "2023-09-01",
        "paymentFrequency": "biweekly",
        "paymentAmount": 180,
        "monthlyPayment": 360,
        "principalPaid": 0,
        "interestPaid": 0,
        "currentBalance": 18000,
        "additionalContributions": true,
        "additionalContributionAmount": 40,
        "isPaused": false,
        "isPaidOff": false,
        "priority": "low"
    }"#;

    let debt = DebtAccount::from_json(json).unwrap();
    assert_eq!(debt.interest_rate, Rate::from_percent(dec!(7.25)));
    assert_eq!(debt.total_monthly_payment(), Money::from_major(400));

    let as_of = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
    let metrics = calculate_debt_metrics(&debt, as_of);
    assert!(metrics.remaining_balance < Money::from_major(18_000));
    assert!(metrics.months_remaining.is_some());
    assert!(metrics.progress_pct > dec!(10));

    let reparsed = DebtAccount::from_json(&debt.to_json().unwrap()).unwrap();
    assert_eq!(calculate_debt_metrics(&reparsed, as_of), metrics);
}

#[test]
fn biweekly_dates_continue_after_clock_advances() {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    ));
    let control = time.test_control().unwrap();

    let debt = DebtAccount::builder()
        .name("Personal loan")
        .initial_amount(Money::from_major(3_000))
        .interest_rate(Rate::from_percentage(9))
        .frequency(PaymentFrequency::Biweekly)
        .payment_amount(Money::from_major(75))
        .first_payment_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        .build_with_time(&time)
        .unwrap();

    let february = calculate_next_payment_dates(&debt, time.now().date_naive(), None);
    let dates: Vec<NaiveDate> = february.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ]
    );

    control.advance(Duration::days(30));
    let march = calculate_next_payment_dates(&debt, time.now().date_naive(), None);
    assert_eq!(march.first().map(|e| e.date), NaiveDate::from_ymd_opt(2024, 3, 15));
    assert!(march.iter().all(|e| e.amount == Money::from_major(75)));
}

#[test]
fn paused_and_paid_off_debts_are_inert() {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let today = time.now().date_naive();

    for (paused, paid_off) in [(true, false), (false, true), (true, true)] {
        let debt = DebtAccountBuilder::auto_loan(Money::from_major(9_000), Rate::from_percentage(5), 36)
            .first_payment_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .progress(Money::from_major(2_000), Money::from_major(400), Money::from_major(7_000))
            .paused(paused)
            .paid_off(paid_off)
            .build_with_time(&time)
            .unwrap();

        assert!(calculate_next_payment_dates(&debt, today, None).is_empty());
        assert_eq!(calculate_payments_from_date(&debt, today).current_balance, Money::from_major(7_000));
        assert!(generate_payoff_schedule(&debt, today).is_empty());
    }
}
