use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::config::MAX_PROJECTION_MONTHS;
use crate::debt::DebtAccount;
use crate::decimal::Money;
use crate::payments::amortization::amortize_month;
use crate::payments::calendar::add_months_clamped;

/// months left until the current balance is retired.
///
/// `Some(0)` for a settled debt, `None` when the payoff cannot be estimated:
/// the debt is paused, or the monthly payment does not cover the interest.
pub fn calculate_months_remaining(debt: &DebtAccount) -> Option<u32> {
    let balance = debt.current_balance;
    if debt.is_paid_off || !balance.is_positive() {
        return Some(0);
    }

    if debt.is_paused {
        return None;
    }

    let payment = debt.total_monthly_payment();
    let rate = debt.monthly_rate();
    let monthly_interest = balance.checked_interest_at(rate)?;

    if payment <= monthly_interest {
        debug!(
            "{} never amortizes: payment {} against interest {}",
            debt.name,
            payment.round_cents(),
            monthly_interest.round_cents()
        );
        return None;
    }

    let months = if rate.is_zero() {
        (balance.as_decimal() / payment.as_decimal()).ceil()
    } else {
        // n = -ln(1 - P*r/M) / ln(1 + r)
        let r = rate.as_decimal();
        let remaining_fraction = Decimal::ONE - monthly_interest.as_decimal() / payment.as_decimal();
        let growth = (Decimal::ONE + r).checked_ln()?;
        if growth.is_zero() {
            return None;
        }
        (-remaining_fraction.checked_ln()? / growth).ceil()
    };

    months.max(Decimal::ZERO).to_u32()
}

/// interest still to be paid between now and payoff.
///
/// Zero when the debt is settled or the payoff cannot be estimated.
pub fn calculate_total_interest_remaining(debt: &DebtAccount) -> Money {
    if debt.is_paid_off || !debt.current_balance.is_positive() {
        return Money::ZERO;
    }

    let months = match calculate_months_remaining(debt) {
        Some(months) if months > 0 => months,
        _ => return Money::ZERO,
    };

    let payment = debt.total_monthly_payment();
    let rate = debt.monthly_rate();

    let mut balance = debt.current_balance;
    let mut total_interest = Money::ZERO;
    let simulated = months.min(MAX_PROJECTION_MONTHS);

    for _ in 0..simulated {
        let Some(step) = amortize_month(balance, payment, rate) else {
            break;
        };

        total_interest += step.interest;
        balance = step.ending_balance;
        if !balance.is_positive() {
            break;
        }
    }

    if months > simulated && balance.is_positive() {
        warn!(
            "{} needs {} months, simulated {} and extrapolated the rest",
            debt.name, months, simulated
        );
        // the tail pays `payment` each month until the balance is gone
        let tail_paid = payment
            .as_decimal()
            .checked_mul(Decimal::from(months - simulated))
            .map(Money::from_decimal);
        if let Some(tail_interest) = tail_paid.and_then(|paid| paid.checked_sub(balance)) {
            total_interest += tail_interest.non_negative();
        }
    }

    total_interest.round_cents()
}

/// share of the purchase price already covered, from 0 to 100.
///
/// The down payment counts as progress, so the figure is measured against
/// the initial amount rather than the financed principal.
pub fn calculate_progress_pct(initial_amount: Money, down_payment: Money, principal_paid: Money) -> Decimal {
    let principal = initial_amount - down_payment;
    if !principal.is_positive() || !initial_amount.is_positive() {
        return dec!(100);
    }

    let covered = (down_payment + principal_paid).as_decimal();
    let pct = covered / initial_amount.as_decimal() * dec!(100);

    pct.clamp(Decimal::ZERO, dec!(100)).round_dp(2)
}

/// calendar date of the final payment counted from `as_of`
pub fn calculate_payoff_date(debt: &DebtAccount, as_of: NaiveDate) -> Option<NaiveDate> {
    let months = calculate_months_remaining(debt)?;
    add_months_clamped(as_of, months)
}
