use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::Money;
use crate::types::PaymentFrequency;

impl PaymentFrequency {
    /// multiplier turning one period's payment into a month-equivalent.
    ///
    /// Biweekly uses 2 rather than 26/12 so that "every other week" reads as
    /// two payments a month, the same as semimonthly.
    pub fn monthly_factor(&self) -> Decimal {
        match self {
            PaymentFrequency::Monthly => Decimal::ONE,
            PaymentFrequency::Biweekly => dec!(2),
            PaymentFrequency::Weekly => dec!(52) / dec!(12),
            PaymentFrequency::Semimonthly => dec!(2),
            PaymentFrequency::Daily => dec!(365) / dec!(12),
        }
    }

    /// number of payments in a calendar year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Semimonthly => 24,
            PaymentFrequency::Daily => 365,
        }
    }

    /// fixed step length in days, for frequencies that have one
    pub fn fixed_period_days(&self) -> Option<i64> {
        match self {
            PaymentFrequency::Daily => Some(1),
            PaymentFrequency::Weekly => Some(7),
            PaymentFrequency::Biweekly => Some(14),
            PaymentFrequency::Monthly | PaymentFrequency::Semimonthly => None,
        }
    }
}

/// convert a per-period payment into its monthly equivalent
pub fn to_monthly(amount: Money, frequency: PaymentFrequency) -> Money {
    amount * frequency.monthly_factor()
}

/// convert a monthly amount into the per-period payment
pub fn from_monthly(amount: Money, frequency: PaymentFrequency) -> Money {
    amount / frequency.monthly_factor()
}
