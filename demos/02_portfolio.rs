/// portfolio - roll several debts into one view
use debt_payoff_rs::chrono::NaiveDate;
use debt_payoff_rs::{
    upcoming_payments, DebtAccount, DebtAccountBuilder, Money, PaymentFrequency,
    PortfolioSummary, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let debts = vec![
        DebtAccountBuilder::mortgage(
            Money::from_major(300_000),
            Money::from_major(60_000),
            Rate::from_percent("6.5".parse()?),
            360,
        )
        .first_payment_date(start)
        .build()?,
        DebtAccountBuilder::credit_card(
            Money::from_major(4_500),
            Rate::from_percentage(22),
            Money::from_major(250),
        )
        .first_payment_date(NaiveDate::from_ymd_opt(2024, 1, 28).unwrap())
        .additional_contribution(Money::from_major(50))
        .build()?,
        DebtAccount::builder()
            .name("Student loan")
            .initial_amount(Money::from_major(18_000))
            .interest_rate(Rate::from_percent("4.99".parse()?))
            .frequency(PaymentFrequency::Semimonthly)
            .payment_amount(Money::from_major(120))
            .first_payment_date(NaiveDate::from_ymd_opt(2022, 9, 1).unwrap())
            .build()?,
    ];

    let summary = PortfolioSummary::from_debts(&debts, today);
    for line in &summary.lines {
        println!(
            "{:<14} balance ${:>11}  {:>6}%  {:?} months",
            line.name, line.metrics.remaining_balance, line.metrics.progress_pct, line.metrics.months_remaining
        );
    }
    println!("\nmonthly outlay: ${}", summary.total_monthly_payment);
    println!("debt free in:   {:?} months", summary.months_to_debt_free);

    println!("\nnext 30 days:");
    for payment in upcoming_payments(&debts, today, None) {
        println!("  {} {:<14} ${}", payment.date, payment.debt_name, payment.amount);
    }

    println!("\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
