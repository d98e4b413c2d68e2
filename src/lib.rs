pub mod config;
pub mod debt;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod portfolio;
pub mod projection;
pub mod types;

// re-export key types
pub use config::{ScheduleConfig, MAX_PROJECTION_MONTHS};
pub use debt::{DebtAccount, DebtAccountBuilder};
pub use decimal::{Money, Rate};
pub use errors::{DebtError, Result};
pub use payments::{
    calculate_monthly_payment, calculate_next_payment_dates, calculate_payment_distribution,
    from_monthly, generate_payoff_schedule, to_monthly, PaymentDateScheduler, PayoffSchedule,
    ScheduledPayment,
};
pub use portfolio::{upcoming_payments, PortfolioSummary, UpcomingPayment};
pub use projection::{
    calculate_debt_metrics, calculate_debt_metrics_now, calculate_months_remaining,
    calculate_payments_from_date, calculate_payoff_date, calculate_progress_pct,
    calculate_total_interest_remaining, DebtMetrics, ProjectedPayments,
};
pub use types::{DebtId, DebtPriority, PaymentDistribution, PaymentEvent, PaymentFrequency};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
