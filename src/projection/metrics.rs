use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::debt::DebtAccount;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::calendar::add_months_clamped;
use crate::projection::history::calculate_payments_from_date;
use crate::projection::payoff::{
    calculate_months_remaining, calculate_progress_pct, calculate_total_interest_remaining,
};

/// current-state snapshot of a debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtMetrics {
    pub remaining_balance: Money,
    pub remaining_principal: Money,
    /// `None` when the payoff cannot be estimated
    pub months_remaining: Option<u32>,
    pub total_interest_paid: Money,
    pub total_interest_remaining: Money,
    pub progress_pct: Decimal,
    /// monthly outlay including extra contributions
    pub monthly_payment: Money,
    pub payoff_date: Option<NaiveDate>,
}

impl DebtMetrics {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// true once nothing is left to pay
    pub fn is_settled(&self) -> bool {
        self.months_remaining == Some(0)
    }
}

/// snapshot of `debt` as of `as_of`.
///
/// Progress is replayed from the first payment date before the payoff
/// figures are derived, so "paid so far" and "remaining" always describe the
/// same balance even when the stored record is out of date.
pub fn calculate_debt_metrics(debt: &DebtAccount, as_of: NaiveDate) -> DebtMetrics {
    let progress = calculate_payments_from_date(debt, as_of);
    let current = debt.with_progress(&progress);

    let months_remaining = calculate_months_remaining(&current);
    let payoff_date = months_remaining.and_then(|months| add_months_clamped(as_of, months));

    DebtMetrics {
        remaining_balance: progress.current_balance,
        remaining_principal: (debt.principal() - progress.principal_paid)
            .non_negative()
            .round_cents(),
        months_remaining,
        total_interest_paid: progress.interest_paid,
        total_interest_remaining: calculate_total_interest_remaining(&current),
        progress_pct: calculate_progress_pct(debt.initial_amount, debt.down_payment, progress.principal_paid),
        monthly_payment: current.total_monthly_payment().round_cents(),
        payoff_date,
    }
}

/// snapshot using the provider's current date as the reference date
pub fn calculate_debt_metrics_now(debt: &DebtAccount, time_provider: &SafeTimeProvider) -> DebtMetrics {
    calculate_debt_metrics(debt, time_provider.now().date_naive())
}
