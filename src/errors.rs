//! Error types shared across the portfolio and history modules

use thiserror::Error;

/// Failures raised while applying or reverting a portfolio command
#[derive(Debug, Error)]
pub enum CommandError {
    /// An index points outside the current fund list
    #[error("fund index {index} is out of range (portfolio has {len} funds)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A fund record failed validation before it could be applied
    #[error("invalid fund data: {0}")]
    InvalidFund(String),
}
