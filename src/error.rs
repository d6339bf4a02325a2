// SPDX-License-Identifier: MIT

//! Typed error handling for decision-rs
//!
//! Every variant renders to the exact string reported in the `error` field
//! of the output envelope.

use thiserror::Error;

/// Error type for a single decision run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// Input could not be decoded as a parameter set
    #[error("failed to decode input: {0}")]
    Decode(String),

    /// Decision type is not one of numeric, string, boolean
    #[error("unknown decision type: {0}")]
    UnknownDecisionType(String),

    /// Left operand of a numeric decision is not a float
    #[error("invalid left numeric value: {0}")]
    InvalidLeftNumeric(String),

    /// Right operand of a numeric decision is not a float
    #[error("invalid right numeric value: {0}")]
    InvalidRightNumeric(String),

    /// Operator not supported by the numeric evaluator
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// Value outside the recognized boolean spellings
    #[error("invalid boolean value: {0}")]
    InvalidBoolean(String),
}

impl DecisionError {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<serde_json::Error> for DecisionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
