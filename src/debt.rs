use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::payments::amortization::calculate_monthly_payment;
use crate::payments::frequency::{from_monthly, to_monthly};
use crate::projection::ProjectedPayments;
use crate::types::{DebtId, DebtPriority, PaymentFrequency};

/// a loan or credit line as stored by the surrounding application.
///
/// The progress fields (`principal_paid`, `interest_paid`, `current_balance`)
/// are whatever was last persisted and may be stale; the projection module
/// recomputes them from `first_payment_date` when a point-in-time view is
/// needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAccount {
    #[serde(default = "Uuid::new_v4")]
    pub id: DebtId,
    pub name: String,

    pub initial_amount: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// annual nominal rate; serialized as a percentage figure
    #[serde(with = "crate::decimal::as_percentage")]
    pub interest_rate: Rate,
    /// `None` for open-ended (revolving) debts
    #[serde(default)]
    pub total_months: Option<u32>,

    pub first_payment_date: NaiveDate,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    /// per-period amount in `payment_frequency` units
    #[serde(default)]
    pub payment_amount: Option<Money>,
    /// month-equivalent payment
    pub monthly_payment: Money,

    #[serde(default)]
    pub principal_paid: Money,
    #[serde(default)]
    pub interest_paid: Money,
    pub current_balance: Money,

    #[serde(default)]
    pub additional_contributions: bool,
    #[serde(default)]
    pub additional_contribution_amount: Money,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub is_paid_off: bool,

    #[serde(default)]
    pub priority: DebtPriority,
}

impl DebtAccount {
    pub fn builder() -> DebtAccountBuilder {
        DebtAccountBuilder::new()
    }

    /// financed amount: initial amount less down payment, never negative
    pub fn principal(&self) -> Money {
        (self.initial_amount - self.down_payment).non_negative()
    }

    pub fn monthly_rate(&self) -> Rate {
        self.interest_rate.monthly_rate()
    }

    /// paused and paid-off debts do not move
    pub fn is_frozen(&self) -> bool {
        self.is_paused || self.is_paid_off
    }

    /// scheduled payment expressed per month, before extra contributions
    pub fn base_monthly_payment(&self) -> Money {
        match self.payment_amount {
            Some(amount) => to_monthly(amount, self.payment_frequency),
            None => self.monthly_payment,
        }
    }

    /// extra principal applied each month, zero when contributions are off
    pub fn extra_monthly_contribution(&self) -> Money {
        if self.additional_contributions {
            self.additional_contribution_amount
        } else {
            Money::ZERO
        }
    }

    /// everything paid toward the debt in a month
    pub fn total_monthly_payment(&self) -> Money {
        self.base_monthly_payment() + self.extra_monthly_contribution()
    }

    /// the amount due on each scheduled payment date
    pub fn period_payment(&self) -> Money {
        match self.payment_amount {
            Some(amount) => amount,
            None => from_monthly(self.monthly_payment, self.payment_frequency),
        }
    }

    /// copy of this record with progress fields replaced by a projection
    pub fn with_progress(&self, progress: &ProjectedPayments) -> DebtAccount {
        DebtAccount {
            principal_paid: progress.principal_paid,
            interest_paid: progress.interest_paid,
            current_balance: progress.current_balance,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DebtError::InvalidDebt {
                message: "name must not be empty".to_string(),
            });
        }

        let amounts = [
            ("initialAmount", self.initial_amount),
            ("downPayment", self.down_payment),
            ("monthlyPayment", self.monthly_payment),
            ("principalPaid", self.principal_paid),
            ("interestPaid", self.interest_paid),
            ("currentBalance", self.current_balance),
            ("additionalContributionAmount", self.additional_contribution_amount),
        ];
        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(DebtError::InvalidAmount { field, amount });
            }
        }

        if self.down_payment > self.initial_amount {
            return Err(DebtError::DownPaymentExceedsAmount {
                initial_amount: self.initial_amount,
                down_payment: self.down_payment,
            });
        }

        if self.interest_rate < Rate::ZERO {
            return Err(DebtError::InvalidRate {
                rate: self.interest_rate,
            });
        }

        if let Some(0) = self.total_months {
            return Err(DebtError::InvalidTerm { months: 0 });
        }

        if let Some(amount) = self.payment_amount {
            if !amount.is_positive() {
                return Err(DebtError::InvalidAmount {
                    field: "paymentAmount",
                    amount,
                });
            }
        }

        Ok(())
    }

    /// parse and validate a JSON debt record
    pub fn from_json(json: &str) -> Result<Self> {
        let debt: DebtAccount = serde_json::from_str(json)?;
        debt.validate()?;
        Ok(debt)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// builder for debt accounts
#[derive(Debug, Default)]
pub struct DebtAccountBuilder {
    id: Option<DebtId>,
    name: Option<String>,
    initial_amount: Option<Money>,
    down_payment: Option<Money>,
    interest_rate: Option<Rate>,
    total_months: Option<u32>,
    first_payment_date: Option<NaiveDate>,
    payment_frequency: Option<PaymentFrequency>,
    payment_amount: Option<Money>,
    monthly_payment: Option<Money>,
    principal_paid: Option<Money>,
    interest_paid: Option<Money>,
    current_balance: Option<Money>,
    additional_contribution: Option<Money>,
    is_paused: bool,
    is_paid_off: bool,
    priority: Option<DebtPriority>,
}

impl DebtAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// fixed-term vehicle loan paid monthly
    pub fn auto_loan(amount: Money, rate: Rate, term_months: u32) -> Self {
        Self::new()
            .name("Auto loan")
            .initial_amount(amount)
            .interest_rate(rate)
            .term_months(term_months)
            .frequency(PaymentFrequency::Monthly)
            .priority(DebtPriority::Medium)
    }

    /// home purchase with a down payment, paid monthly
    pub fn mortgage(price: Money, down_payment: Money, rate: Rate, term_months: u32) -> Self {
        Self::new()
            .name("Mortgage")
            .initial_amount(price)
            .down_payment(down_payment)
            .interest_rate(rate)
            .term_months(term_months)
            .frequency(PaymentFrequency::Monthly)
            .priority(DebtPriority::Low)
    }

    /// revolving balance with a fixed monthly payment and no term
    pub fn credit_card(balance: Money, apr: Rate, monthly_payment: Money) -> Self {
        Self::new()
            .name("Credit card")
            .initial_amount(balance)
            .interest_rate(apr)
            .monthly_payment(monthly_payment)
            .frequency(PaymentFrequency::Monthly)
            .priority(DebtPriority::High)
    }

    pub fn id(mut self, id: DebtId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn initial_amount(mut self, amount: Money) -> Self {
        self.initial_amount = Some(amount);
        self
    }

    pub fn down_payment(mut self, amount: Money) -> Self {
        self.down_payment = Some(amount);
        self
    }

    pub fn interest_rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.total_months = Some(months);
        self
    }

    pub fn first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.payment_frequency = Some(frequency);
        self
    }

    /// per-period payment in the configured frequency
    pub fn payment_amount(mut self, amount: Money) -> Self {
        self.payment_amount = Some(amount);
        self
    }

    pub fn monthly_payment(mut self, amount: Money) -> Self {
        self.monthly_payment = Some(amount);
        self
    }

    /// stored progress, as last persisted
    pub fn progress(mut self, principal_paid: Money, interest_paid: Money, current_balance: Money) -> Self {
        self.principal_paid = Some(principal_paid);
        self.interest_paid = Some(interest_paid);
        self.current_balance = Some(current_balance);
        self
    }

    pub fn current_balance(mut self, balance: Money) -> Self {
        self.current_balance = Some(balance);
        self
    }

    /// extra principal paid every month
    pub fn additional_contribution(mut self, amount: Money) -> Self {
        self.additional_contribution = Some(amount);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.is_paused = paused;
        self
    }

    pub fn paid_off(mut self, paid_off: bool) -> Self {
        self.is_paid_off = paid_off;
        self
    }

    pub fn priority(mut self, priority: DebtPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// build, defaulting the first payment date to today's system date
    pub fn build(self) -> Result<DebtAccount> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with an explicit clock for the first payment date default
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<DebtAccount> {
        let name = self.name.ok_or(DebtError::InvalidDebt {
            message: "name required".to_string(),
        })?;

        let initial_amount = self.initial_amount.ok_or(DebtError::InvalidDebt {
            message: "initial amount required".to_string(),
        })?;

        let interest_rate = self.interest_rate.unwrap_or(Rate::ZERO);
        let down_payment = self.down_payment.unwrap_or(Money::ZERO);
        let payment_frequency = self.payment_frequency.unwrap_or_default();
        let principal = (initial_amount - down_payment).non_negative();

        let monthly_payment = match (self.monthly_payment, self.payment_amount, self.total_months) {
            (Some(monthly), _, _) => monthly,
            (None, Some(amount), _) => to_monthly(amount, payment_frequency).round_cents(),
            (None, None, Some(months)) => calculate_monthly_payment(principal, interest_rate, months),
            (None, None, None) => Money::ZERO,
        };

        let first_payment_date = self
            .first_payment_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        let additional_contribution = self.additional_contribution.unwrap_or(Money::ZERO);

        let debt = DebtAccount {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            initial_amount,
            down_payment,
            interest_rate,
            total_months: self.total_months,
            first_payment_date,
            payment_frequency,
            payment_amount: self.payment_amount,
            monthly_payment,
            principal_paid: self.principal_paid.unwrap_or(Money::ZERO),
            interest_paid: self.interest_paid.unwrap_or(Money::ZERO),
            current_balance: self.current_balance.unwrap_or(principal),
            additional_contributions: additional_contribution.is_positive(),
            additional_contribution_amount: additional_contribution,
            is_paused: self.is_paused,
            is_paid_off: self.is_paid_off,
            priority: self.priority.unwrap_or_default(),
        };

        debt.validate()?;
        Ok(debt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn fixed_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_builder_derives_monthly_payment_from_term() {
        let debt = DebtAccountBuilder::auto_loan(
            Money::from_major(12_000),
            Rate::from_percentage(6),
            24,
        )
        .build_with_time(&fixed_time())
        .unwrap();

        assert_eq!(debt.monthly_payment, Money::from_str_exact("531.85").unwrap());
        assert_eq!(debt.current_balance, Money::from_major(12_000));
        assert_eq!(debt.first_payment_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_builder_derives_monthly_payment_from_period_amount() {
        let debt = DebtAccount::builder()
            .name("Student loan")
            .initial_amount(Money::from_major(5_000))
            .interest_rate(Rate::from_percent(dec!(4.5)))
            .frequency(PaymentFrequency::Biweekly)
            .payment_amount(Money::from_major(100))
            .build_with_time(&fixed_time())
            .unwrap();

        assert_eq!(debt.monthly_payment, Money::from_major(200));
        assert_eq!(debt.base_monthly_payment(), Money::from_major(200));
        assert_eq!(debt.period_payment(), Money::from_major(100));
    }

    #[test]
    fn test_mortgage_principal_excludes_down_payment() {
        let debt = DebtAccountBuilder::mortgage(
            Money::from_major(300_000),
            Money::from_major(60_000),
            Rate::from_percent(dec!(6.5)),
            360,
        )
        .build_with_time(&fixed_time())
        .unwrap();

        assert_eq!(debt.principal(), Money::from_major(240_000));
        assert_eq!(debt.current_balance, Money::from_major(240_000));
    }

    #[test]
    fn test_extra_contribution_adds_to_monthly_total() {
        let debt = DebtAccountBuilder::credit_card(
            Money::from_major(4_000),
            Rate::from_percent(dec!(19.99)),
            Money::from_major(150),
        )
        .additional_contribution(Money::from_major(50))
        .build_with_time(&fixed_time())
        .unwrap();

        assert!(debt.additional_contributions);
        assert_eq!(debt.total_monthly_payment(), Money::from_major(200));
        assert_eq!(debt.total_months, None);
    }

    #[test]
    fn test_validation_rejects_bad_records() {
        let missing_name = DebtAccount::builder()
            .initial_amount(Money::from_major(100))
            .build_with_time(&fixed_time());
        assert!(matches!(missing_name, Err(DebtError::InvalidDebt { .. })));

        let excess_down = DebtAccountBuilder::mortgage(
            Money::from_major(100),
            Money::from_major(200),
            Rate::from_percentage(5),
            12,
        )
        .build_with_time(&fixed_time());
        assert!(matches!(excess_down, Err(DebtError::DownPaymentExceedsAmount { .. })));

        let zero_term = DebtAccountBuilder::auto_loan(Money::from_major(100), Rate::ZERO, 0)
            .build_with_time(&fixed_time());
        assert!(matches!(zero_term, Err(DebtError::InvalidTerm { months: 0 })));

        let negative_rate = DebtAccountBuilder::auto_loan(
            Money::from_major(100),
            Rate::from_decimal(dec!(-0.01)),
            12,
        )
        .build_with_time(&fixed_time());
        assert!(matches!(negative_rate, Err(DebtError::InvalidRate { .. })));
    }

    #[test]
    fn test_json_uses_camel_case_and_percentages() {
        let json = r#"{
            "name": "Car",
            "initialAmount": 12000,
            "interestRate": 6,
            "totalMonths": 24,
            "firstPaymentDate": "2024-01-15",
            "paymentFrequency": "monthly",
            "monthlyPayment": "531.85",
            "currentBalance": 12000,
            "priority": "high"
        }"#;

        let debt = DebtAccount::from_json(json).unwrap();
        assert_eq!(debt.interest_rate, Rate::from_percentage(6));
        assert_eq!(debt.total_months, Some(24));
        assert_eq!(debt.priority, DebtPriority::High);
        assert!(!debt.is_paused);

        let out = debt.to_json().unwrap();
        assert!(out.contains("\"interestRate\""));
        assert!(out.contains("\"firstPaymentDate\": \"2024-01-15\""));

        let back = DebtAccount::from_json(&out).unwrap();
        assert_eq!(back, debt);
    }

    #[test]
    fn test_json_runs_validation() {
        let json = r#"{
            "name": "Broken",
            "initialAmount": 100,
            "downPayment": 500,
            "interestRate": 5,
            "firstPaymentDate": "2024-01-15",
            "monthlyPayment": 10,
            "currentBalance": 100
        }"#;

        assert!(matches!(
            DebtAccount::from_json(json),
            Err(DebtError::DownPaymentExceedsAmount { .. })
        ));
        assert!(matches!(
            DebtAccount::from_json("{ not json"),
            Err(DebtError::Serialization(_))
        ));
    }
}
