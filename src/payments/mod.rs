pub mod amortization;
pub mod calendar;
pub mod frequency;

pub use amortization::{
    amortize_month, calculate_monthly_payment, calculate_payment_distribution,
    generate_payoff_schedule, AmortizationStep, PayoffSchedule, ScheduledPayment,
};
pub use calendar::{calculate_next_payment_dates, PaymentDateScheduler, PaymentDates};
pub use frequency::{from_monthly, to_monthly};
