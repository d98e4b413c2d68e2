use chrono::{Datelike, NaiveDate};
use log::{trace, warn};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::config::MAX_PROJECTION_MONTHS;
use crate::debt::DebtAccount;
use crate::decimal::{Money, Rate};
use crate::payments::calendar::{day_in_month_after, months_between};
use crate::projection::history::calculate_payments_from_date;
use crate::projection::payoff::calculate_months_remaining;
use crate::types::{DebtId, PaymentDistribution};

/// level monthly payment that retires `principal` over `total_months`.
///
/// Returns zero for an empty principal or term, and for terms whose
/// compounding factor cannot be represented.
pub fn calculate_monthly_payment(principal: Money, annual_rate: Rate, total_months: u32) -> Money {
    if !principal.is_positive() || total_months == 0 {
        return Money::ZERO;
    }

    // interest-free terms split evenly, unrounded
    if annual_rate.is_zero() {
        return principal / Decimal::from(total_months);
    }

    // PMT = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let r = annual_rate.monthly_rate().as_decimal();
    let compound = match (Decimal::ONE + r).checked_powi(i64::from(total_months)) {
        Some(compound) => compound,
        None => return Money::ZERO,
    };

    let denominator = compound - Decimal::ONE;
    if denominator <= Decimal::ZERO {
        return Money::ZERO;
    }

    match principal.as_decimal().checked_mul(r).and_then(|x| x.checked_mul(compound)) {
        Some(numerator) => Money::from_decimal(numerator / denominator).round_cents(),
        None => Money::ZERO,
    }
}

/// split one payment into interest and principal.
///
/// When the payment does not cover the month's interest the reported
/// interest is capped at the payment and principal is zero.
pub fn calculate_payment_distribution(payment: Money, balance: Money, monthly_rate: Rate) -> PaymentDistribution {
    let interest = balance.interest_at(monthly_rate);
    let principal = (payment - interest).non_negative();

    PaymentDistribution {
        principal,
        interest: interest.min(payment),
    }
}

/// one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationStep {
    pub interest: Money,
    /// negative when the payment does not cover interest
    pub principal: Money,
    pub ending_balance: Money,
}

/// apply one monthly payment to `balance`.
///
/// The principal portion never exceeds the balance, so the final payment of
/// a loan is shortened rather than overshooting. `None` if the numbers leave
/// decimal range.
pub fn amortize_month(balance: Money, payment: Money, monthly_rate: Rate) -> Option<AmortizationStep> {
    let interest = balance.checked_interest_at(monthly_rate)?;
    let principal = payment.checked_sub(interest)?.min(balance);
    let ending_balance = balance.checked_sub(principal)?;

    Some(AmortizationStep {
        interest,
        principal,
        ending_balance,
    })
}

/// scheduled payment in a payoff schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// forward amortization table from a debt's current position to payoff
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffSchedule {
    pub debt_id: DebtId,
    pub as_of: NaiveDate,
    pub starting_balance: Money,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl PayoffSchedule {
    /// remaining payments for `debt` as of `as_of`.
    ///
    /// The starting point is the projected balance, not the stored one. Paused,
    /// settled and non-amortizing debts produce an empty table, and the table
    /// stops after [`MAX_PROJECTION_MONTHS`] rows.
    pub fn generate(debt: &DebtAccount, as_of: NaiveDate) -> Self {
        let progress = calculate_payments_from_date(debt, as_of);
        let current = debt.with_progress(&progress);
        let monthly_payment = current.total_monthly_payment();

        let mut schedule = Self {
            debt_id: debt.id,
            as_of,
            starting_balance: current.current_balance,
            monthly_payment: monthly_payment.round_cents(),
            payments: Vec::new(),
            total_interest: Money::ZERO,
            total_payment: Money::ZERO,
        };

        let months = match calculate_months_remaining(&current) {
            Some(months) if months > 0 => months,
            _ => return schedule,
        };

        // payments made through last month are already in `progress`
        let first_month = months_between(as_of, debt.first_payment_date).max(0) as u32;
        let payment_day = debt.first_payment_date.day();
        let rate = current.monthly_rate();

        let mut balance = current.current_balance;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        if months > MAX_PROJECTION_MONTHS {
            warn!(
                "{} needs {} months, schedule truncated to {} rows",
                debt.name, months, MAX_PROJECTION_MONTHS
            );
        }

        for number in 1..=months.min(MAX_PROJECTION_MONTHS) {
            let Some(payment_date) = day_in_month_after(as_of, first_month + number - 1, payment_day) else {
                break;
            };
            let Some(step) = amortize_month(balance, monthly_payment, rate) else {
                break;
            };

            cumulative_interest += step.interest;
            cumulative_principal += step.principal;

            schedule.payments.push(ScheduledPayment {
                payment_number: number,
                payment_date,
                beginning_balance: balance.round_cents(),
                payment_amount: (step.interest + step.principal).round_cents(),
                principal_portion: step.principal.round_cents(),
                interest_portion: step.interest.round_cents(),
                ending_balance: step.ending_balance.non_negative().round_cents(),
                cumulative_interest: cumulative_interest.round_cents(),
                cumulative_principal: cumulative_principal.round_cents(),
            });

            balance = step.ending_balance;
            if !balance.is_positive() {
                break;
            }
        }

        trace!("{} payoff schedule has {} payments", debt.name, schedule.payments.len());

        schedule.total_interest = cumulative_interest.round_cents();
        schedule.total_payment = (cumulative_interest + cumulative_principal).round_cents();
        schedule
    }

    /// get payment for specific period
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    /// get remaining balance after payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.starting_balance)
    }

    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.payments.last().map(|p| p.payment_date)
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

/// remaining payments for `debt` from its projected position at `as_of`
pub fn generate_payoff_schedule(debt: &DebtAccount, as_of: NaiveDate) -> PayoffSchedule {
    PayoffSchedule::generate(debt, as_of)
}
