//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::token::Operator;

/// Domain errors represent malformed input and arithmetic faults.
/// These are independent of I/O and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed expression: no tokens found")]
    EmptyExpression,

    #[error("malformed expression: operator '{operator}' at token {position} is missing operands")]
    MalformedExpression { operator: Operator, position: usize },

    #[error("malformed expression: {count} subtrees left without an operator")]
    DanglingOperands { count: usize },

    #[error("division by zero in '{operator}'")]
    DivisionByZero { operator: Operator },

    #[error("integer overflow in '{operator}'")]
    Overflow { operator: Operator },

    #[error("negative exponent: {exponent}")]
    NegativeExponent { exponent: i64 },

    #[error("malformed graph: {message}")]
    MalformedGraph { message: String },

    #[error("city {city} out of range 1..={count}")]
    CityOutOfRange { city: usize, count: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
