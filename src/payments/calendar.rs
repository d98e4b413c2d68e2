use chrono::{Datelike, Days, Months, NaiveDate};
use log::debug;

use crate::config::ScheduleConfig;
use crate::debt::DebtAccount;
use crate::types::{PaymentEvent, PaymentFrequency};

/// whole calendar months from `from` to `to`, ignoring the day of month
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// add months keeping the day of month, clamped to the month's last day
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// day `day` of the month `months` after `date`'s month, clamped to month end
pub fn day_in_month_after(date: NaiveDate, months: u32, day: u32) -> Option<NaiveDate> {
    let first = date.with_day(1)?.checked_add_months(Months::new(months))?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    first.with_day(day.clamp(1, last.day()))
}

/// one calendar month later with day overflow rolling into the next month
/// (Jan 31 becomes Mar 3 in a common year)
fn add_month_rollover(date: NaiveDate) -> Option<NaiveDate> {
    let first_of_next = date.with_day(1)?.checked_add_months(Months::new(1))?;
    first_of_next.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// next payment date after `date` for the given frequency
pub fn next_payment_date(date: NaiveDate, frequency: PaymentFrequency) -> Option<NaiveDate> {
    match frequency {
        PaymentFrequency::Monthly => add_month_rollover(date),
        PaymentFrequency::Semimonthly => {
            if date.day() <= 14 {
                date.with_day(15)
            } else {
                date.with_day(1)?.checked_add_months(Months::new(1))
            }
        }
        PaymentFrequency::Biweekly => date.checked_add_days(Days::new(14)),
        PaymentFrequency::Weekly => date.checked_add_days(Days::new(7)),
        PaymentFrequency::Daily => date.checked_add_days(Days::new(1)),
    }
}

/// lower bound on the number of periods between `anchor` and `start`.
///
/// Calendar frequencies can cover more than one month in a single rollover
/// step, so their estimate backs off far enough that jumping never lands past
/// the first date on or after `start`.
fn estimate_elapsed_periods(anchor: NaiveDate, start: NaiveDate, frequency: PaymentFrequency) -> u64 {
    match frequency.fixed_period_days() {
        Some(days) => ((start - anchor).num_days() / days).max(0) as u64,
        None => {
            let months = months_between(anchor, start).max(0) as u64;
            match frequency {
                PaymentFrequency::Semimonthly => (months * 2).saturating_sub(2),
                _ => months.saturating_sub(2),
            }
        }
    }
}

fn skip_periods(anchor: NaiveDate, periods: u64, frequency: PaymentFrequency) -> Option<NaiveDate> {
    match frequency.fixed_period_days() {
        Some(days) => anchor.checked_add_days(Days::new(periods.checked_mul(days as u64)?)),
        None => (0..periods).try_fold(anchor, |date, _| next_payment_date(date, frequency)),
    }
}

/// unbounded sequence of payment dates for one frequency
#[derive(Debug, Clone)]
pub struct PaymentDates {
    next: Option<NaiveDate>,
    frequency: PaymentFrequency,
}

impl PaymentDates {
    /// dates starting exactly at `anchor`
    pub fn starting_at(anchor: NaiveDate, frequency: PaymentFrequency) -> Self {
        Self {
            next: Some(anchor),
            frequency,
        }
    }

    /// dates of the schedule anchored at `anchor`, beginning with the first
    /// one on or after `start`
    pub fn aligned_to(anchor: NaiveDate, frequency: PaymentFrequency, start: NaiveDate) -> Self {
        if anchor >= start {
            return Self::starting_at(anchor, frequency);
        }

        let periods = estimate_elapsed_periods(anchor, start, frequency);
        let mut current = skip_periods(anchor, periods, frequency);
        while let Some(date) = current {
            if date >= start {
                break;
            }
            current = next_payment_date(date, frequency);
        }

        Self {
            next: current,
            frequency,
        }
    }
}

impl Iterator for PaymentDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = next_payment_date(current, self.frequency);
        Some(current)
    }
}

/// generates concrete payment dates for a debt within a window
#[derive(Debug, Clone, Default)]
pub struct PaymentDateScheduler {
    config: ScheduleConfig,
}

impl PaymentDateScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// payments falling in `[start, end]`; `end` defaults to the configured
    /// window after `start`
    pub fn next_payment_dates(
        &self,
        debt: &DebtAccount,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Vec<PaymentEvent> {
        if debt.is_frozen() || !debt.current_balance.is_positive() {
            return Vec::new();
        }

        let amount = debt.period_payment();
        if !amount.is_positive() {
            return Vec::new();
        }

        let end = match end.or_else(|| add_months_clamped(start, self.config.default_window_months)) {
            Some(end) if end >= start => end,
            _ => return Vec::new(),
        };

        let events: Vec<PaymentEvent> =
            PaymentDates::aligned_to(debt.first_payment_date, debt.payment_frequency, start)
                .take_while(|date| *date <= end)
                .take(self.config.max_events)
                .map(|date| PaymentEvent { date, amount })
                .collect();

        if events.len() == self.config.max_events {
            debug!(
                "payment window for {} capped at {} events ending {}",
                debt.name,
                self.config.max_events,
                events.last().map(|e| e.date).unwrap_or(end)
            );
        }

        events
    }
}

/// payments for `debt` in `[start, end]` using the default window and cap
pub fn calculate_next_payment_dates(
    debt: &DebtAccount,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Vec<PaymentEvent> {
    PaymentDateScheduler::default().next_payment_dates(debt, start, end)
}
