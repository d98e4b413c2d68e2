use chrono::NaiveDate;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::debt::DebtAccount;
use crate::decimal::Money;
use crate::payments::amortization::amortize_month;
use crate::payments::calendar::months_between;

/// point-in-time progress rebuilt from the first payment date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPayments {
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub current_balance: Money,
    pub months_paid: u32,
}

/// replay every monthly payment from `first_payment_date` up to `as_of`.
///
/// Stored progress fields are ignored unless the debt is paused or paid off,
/// in which case they are returned as they are. A payment is counted once
/// its calendar month has ended, so a debt whose first payment falls in the
/// current month has no progress yet.
pub fn calculate_payments_from_date(debt: &DebtAccount, as_of: NaiveDate) -> ProjectedPayments {
    let months_diff = months_between(debt.first_payment_date, as_of);

    if debt.is_frozen() {
        let elapsed = months_diff.max(0).min(u32::MAX as i64) as u32;
        trace!("{} is frozen, keeping stored progress", debt.name);
        return ProjectedPayments {
            principal_paid: debt.principal_paid,
            interest_paid: debt.interest_paid,
            current_balance: debt.current_balance.non_negative(),
            months_paid: debt.total_months.map_or(elapsed, |term| elapsed.min(term)),
        };
    }

    let principal = debt.principal();

    if months_diff < 0 {
        return ProjectedPayments {
            principal_paid: Money::ZERO,
            interest_paid: Money::ZERO,
            current_balance: principal.round_cents(),
            months_paid: 0,
        };
    }

    let elapsed = months_diff.min(u32::MAX as i64) as u32;
    let months = match debt.total_months {
        Some(term) => elapsed.min(term),
        None => elapsed,
    };

    let payment = debt.total_monthly_payment();
    let rate = debt.monthly_rate();

    let mut balance = principal;
    let mut principal_paid = Money::ZERO;
    let mut interest_paid = Money::ZERO;
    let mut months_paid = 0;

    while months_paid < months && balance.is_positive() {
        let Some(step) = amortize_month(balance, payment, rate) else {
            warn!("{} balance left decimal range after {} months", debt.name, months_paid);
            break;
        };

        interest_paid += step.interest;
        principal_paid += step.principal;
        balance = step.ending_balance;
        months_paid += 1;
    }

    ProjectedPayments {
        principal_paid: principal_paid.round_cents(),
        interest_paid: interest_paid.round_cents(),
        current_balance: balance.non_negative().round_cents(),
        months_paid,
    }
}
