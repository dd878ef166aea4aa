//! Error types for power balance computation and keyed state access.

use thiserror::Error;

use crate::sim::types::Field;

/// Errors raised by the balance calculator and [`crate::sim::types::EnergyState`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// An input quantity was negative or not a finite number.
    #[error("invalid input for `{field}`: {value} (must be finite and >= 0)")]
    InvalidInput { field: Field, value: f64 },

    /// A keyed lookup used a name that is not an energy state field.
    #[error("unknown energy state field `{0}`")]
    UnknownField(String),
}
