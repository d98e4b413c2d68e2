use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// longest month-by-month simulation run for one debt (100 years); payoff
/// estimates beyond it are extrapolated from the closed-form month count
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// settings for the payment date scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    /// hard cap on events emitted for a single window
    pub max_events: usize,
    /// window length used when the caller gives no end date
    pub default_window_months: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_events: 100,
            default_window_months: 1,
        }
    }
}

impl ScheduleConfig {
    /// the next three months, e.g. for an "upcoming payments" panel
    pub fn quarter_view() -> Self {
        Self {
            default_window_months: 3,
            ..Self::default()
        }
    }

    /// a full year; daily debts still stop at the cap
    pub fn year_view() -> Self {
        Self {
            max_events: 400,
            default_window_months: 12,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
