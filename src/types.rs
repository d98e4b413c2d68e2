use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a debt account
pub type DebtId = Uuid;

/// how often a debt is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
    Semimonthly,
    Daily,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::Weekly,
        PaymentFrequency::Semimonthly,
        PaymentFrequency::Daily,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Semimonthly => "semimonthly",
            PaymentFrequency::Daily => "daily",
        }
    }

    /// lenient parse: unrecognised names fall back to monthly
    pub fn parse_lenient(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "biweekly" | "fortnightly" => PaymentFrequency::Biweekly,
            "weekly" => PaymentFrequency::Weekly,
            "semimonthly" | "twicemonthly" => PaymentFrequency::Semimonthly,
            "daily" => PaymentFrequency::Daily,
            _ => PaymentFrequency::Monthly,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PaymentFrequency::parse_lenient(s))
    }
}

impl From<String> for PaymentFrequency {
    fn from(s: String) -> Self {
        PaymentFrequency::parse_lenient(&s)
    }
}

impl From<PaymentFrequency> for String {
    fn from(f: PaymentFrequency) -> Self {
        f.as_str().to_string()
    }
}

/// repayment priority; carried through untouched by every calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// split of a single payment between interest and principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentDistribution {
    pub principal: Money,
    pub interest: Money,
}

impl PaymentDistribution {
    pub fn total(&self) -> Money {
        self.principal + self.interest
    }
}

/// a single dated payment produced by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub date: NaiveDate,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_lenient_parse() {
        assert_eq!("biweekly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Biweekly);
        assert_eq!("Semi-Monthly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Semimonthly);
        assert_eq!("quarterly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!("".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
    }

    #[test]
    fn test_frequency_serde_names() {
        let json = serde_json::to_string(&PaymentFrequency::Semimonthly).unwrap();
        assert_eq!(json, "\"semimonthly\"");

        let parsed: PaymentFrequency = serde_json::from_str("\"annually\"").unwrap();
        assert_eq!(parsed, PaymentFrequency::Monthly);
    }

    #[test]
    fn test_priority_serde() {
        let parsed: DebtPriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, DebtPriority::High);
    }
}
