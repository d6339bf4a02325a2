// SPDX-License-Identifier: MIT

//! Typed view of a decision request

use crate::error::DecisionError;
use std::str::FromStr;

/// Which evaluator handles the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionType {
    Numeric,
    String,
    Boolean,
}

impl FromStr for DecisionType {
    type Err = DecisionError;

    /// Expects the already normalized (trimmed, lower-cased) form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(DecisionType::Numeric),
            "string" => Ok(DecisionType::String),
            "boolean" => Ok(DecisionType::Boolean),
            other => Err(DecisionError::UnknownDecisionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for DecisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionType::Numeric => write!(f, "numeric"),
            DecisionType::String => write!(f, "string"),
            DecisionType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// == or =
    Eq,
    /// != or <>
    NotEq,
    /// >
    Gt,
    /// >=
    Gte,
    /// <
    Lt,
    /// <=
    Lte,
    /// contains (strings only)
    Contains,
    /// startswith (strings only)
    StartsWith,
    /// endswith (strings only)
    EndsWith,
}

impl CompareOp {
    /// Look up an operator token. Matching is exact and case-sensitive.
    pub fn parse(token: &str) -> Option<CompareOp> {
        let op = match token {
            "==" | "=" => CompareOp::Eq,
            "!=" | "<>" => CompareOp::NotEq,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Gte,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Lte,
            "contains" => CompareOp::Contains,
            "startswith" => CompareOp::StartsWith,
            "endswith" => CompareOp::EndsWith,
            _ => return None,
        };
        Some(op)
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::NotEq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
            CompareOp::Contains => write!(f, "contains"),
            CompareOp::StartsWith => write!(f, "startswith"),
            CompareOp::EndsWith => write!(f, "endswith"),
        }
    }
}

/// The four logical fields extracted from a parameter set.
///
/// `decision_type` is trimmed and lower-cased; the other fields are trimmed
/// only. `operator` stays a raw string so results and errors echo exactly
/// what the caller sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionRequest {
    pub decision_type: String,
    pub left_value: String,
    pub right_value: String,
    pub operator: String,
}
