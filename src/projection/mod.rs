pub mod history;
pub mod metrics;
pub mod payoff;

pub use history::{calculate_payments_from_date, ProjectedPayments};
pub use metrics::{calculate_debt_metrics, calculate_debt_metrics_now, DebtMetrics};
pub use payoff::{
    calculate_months_remaining, calculate_payoff_date, calculate_progress_pct,
    calculate_total_interest_remaining,
};
