/// quick start - project a car loan two months in
use debt_payoff_rs::chrono::NaiveDate;
use debt_payoff_rs::{calculate_debt_metrics, DebtAccountBuilder, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $12,000 at 6% over two years, first payment mid-January
    let loan = DebtAccountBuilder::auto_loan(Money::from_major(12_000), Rate::from_percentage(6), 24)
        .first_payment_date(NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("bad date")?)
        .build()?;

    println!("monthly payment: ${}", loan.monthly_payment);

    // snapshot after the January and February payments
    let metrics = calculate_debt_metrics(&loan, NaiveDate::from_ymd_opt(2024, 3, 20).ok_or("bad date")?);
    println!("{}", metrics.to_json()?);

    Ok(())
}
