/// time control - watch a loan amortize under a controlled clock
use chrono::{Duration, TimeZone, Utc};
use debt_payoff_rs::{
    calculate_debt_metrics_now, calculate_next_payment_dates, generate_payoff_schedule,
    DebtAccountBuilder, Money, PaymentFrequency, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    println!("=== time control example ===\n");
    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    // first payment defaults to the controlled "today"
    let loan = DebtAccountBuilder::auto_loan(Money::from_major(25_000), Rate::from_percentage(5), 48)
        .frequency(PaymentFrequency::Biweekly)
        .payment_amount(Money::from_major(290))
        .build_with_time(&time)?;

    for _ in 0..4 {
        let today = time.now().date_naive();
        let metrics = calculate_debt_metrics_now(&loan, &time);
        let upcoming = calculate_next_payment_dates(&loan, today, None);

        println!("\n{}", today);
        println!("  balance:           ${}", metrics.remaining_balance);
        println!("  interest paid:     ${}", metrics.total_interest_paid);
        println!("  progress:          {}%", metrics.progress_pct);
        println!("  months remaining:  {:?}", metrics.months_remaining);
        for event in upcoming {
            println!("  due {}: ${}", event.date, event.amount);
        }

        // jump a quarter ahead
        controller.advance(Duration::days(91));
    }

    let schedule = generate_payoff_schedule(&loan, time.now().date_naive());
    println!(
        "\n{} payments left, ${} interest, final payment {:?}",
        schedule.payments.len(),
        schedule.total_interest,
        schedule.payoff_date()
    );

    Ok(())
}
