use thiserror::Error;

use crate::decimal::{Money, Rate};

/// errors raised while constructing or parsing a debt record.
///
/// The calculation engine itself is total and never returns these.
#[derive(Error, Debug)]
pub enum DebtError {
    #[error("invalid amount for {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("down payment {down_payment} exceeds initial amount {initial_amount}")]
    DownPaymentExceedsAmount {
        initial_amount: Money,
        down_payment: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid debt: {message}")]
    InvalidDebt {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DebtError>;
