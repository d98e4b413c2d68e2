use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::debt::DebtAccount;
use crate::decimal::Money;
use crate::payments::calendar::PaymentDateScheduler;
use crate::projection::metrics::{calculate_debt_metrics, DebtMetrics};
use crate::types::{DebtId, DebtPriority};

/// a scheduled payment tagged with the debt it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub priority: DebtPriority,
    pub date: NaiveDate,
    pub amount: Money,
}

/// every debt's payments in `[start, end]`, ordered by date then debt name
pub fn upcoming_payments(debts: &[DebtAccount], start: NaiveDate, end: Option<NaiveDate>) -> Vec<UpcomingPayment> {
    upcoming_payments_with(&PaymentDateScheduler::default(), debts, start, end)
}

pub fn upcoming_payments_with(
    scheduler: &PaymentDateScheduler,
    debts: &[DebtAccount],
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Vec<UpcomingPayment> {
    let mut payments: Vec<UpcomingPayment> = debts
        .iter()
        .flat_map(|debt| {
            scheduler
                .next_payment_dates(debt, start, end)
                .into_iter()
                .map(move |event| UpcomingPayment {
                    debt_id: debt.id,
                    debt_name: debt.name.clone(),
                    priority: debt.priority,
                    date: event.date,
                    amount: event.amount,
                })
        })
        .collect();

    payments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.debt_name.cmp(&b.debt_name)));
    payments
}

/// snapshot of one debt inside a portfolio summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtLine {
    pub debt_id: DebtId,
    pub name: String,
    pub priority: DebtPriority,
    pub active: bool,
    pub metrics: DebtMetrics,
}

/// totals across a set of debts at one reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub as_of: NaiveDate,
    pub lines: Vec<DebtLine>,
    pub total_remaining_balance: Money,
    pub total_interest_paid: Money,
    pub total_interest_remaining: Money,
    /// combined monthly outlay of the active debts
    pub total_monthly_payment: Money,
    /// months until the last active debt is cleared; `None` if any active
    /// debt cannot be estimated
    pub months_to_debt_free: Option<u32>,
    pub active_debts: usize,
}

impl PortfolioSummary {
    pub fn from_debts(debts: &[DebtAccount], as_of: NaiveDate) -> Self {
        let lines: Vec<DebtLine> = debts
            .iter()
            .map(|debt| DebtLine {
                debt_id: debt.id,
                name: debt.name.clone(),
                priority: debt.priority,
                active: !debt.is_frozen(),
                metrics: calculate_debt_metrics(debt, as_of),
            })
            .collect();

        let active: Vec<&DebtLine> = lines.iter().filter(|line| line.active).collect();

        let months_to_debt_free = active
            .iter()
            .map(|line| line.metrics.months_remaining)
            .try_fold(0u32, |longest, months| months.map(|m| longest.max(m)));

        Self {
            as_of,
            total_remaining_balance: lines.iter().map(|l| l.metrics.remaining_balance).sum(),
            total_interest_paid: lines.iter().map(|l| l.metrics.total_interest_paid).sum(),
            total_interest_remaining: lines.iter().map(|l| l.metrics.total_interest_remaining).sum(),
            total_monthly_payment: active
                .iter()
                .filter(|l| !l.metrics.is_settled())
                .map(|l| l.metrics.monthly_payment)
                .sum(),
            months_to_debt_free,
            active_debts: active.len(),
            lines,
        }
    }

    pub fn line(&self, debt_id: DebtId) -> Option<&DebtLine> {
        self.lines.iter().find(|line| line.debt_id == debt_id)
    }
}
