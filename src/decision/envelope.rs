// SPDX-License-Identifier: MIT

//! Output envelope
//!
//! On the wire the envelope always carries both fields:
//! - `{"result": {"decision": true, "message": "5 > 3 = true"}, "error": ""}`
//! - `{"result": null, "error": "unknown decision type: date"}`

use super::ast::DecisionRequest;
use crate::error::DecisionError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::io::Write;

/// Outcome of a successful evaluation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DecisionResult {
    pub decision: bool,
    pub message: String,
}

impl DecisionResult {
    /// Restate the request as `"<left> <operator> <right> = <decision>"`.
    ///
    /// Uses the trimmed request strings for every decision type, so boolean
    /// results still show the right value and operator.
    pub fn new(request: &DecisionRequest, decision: bool) -> Self {
        Self {
            decision,
            message: format!(
                "{} {} {} = {}",
                request.left_value, request.operator, request.right_value, decision
            ),
        }
    }
}

/// Either a result or an error, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Success(DecisionResult),
    Failure(String),
}

impl Envelope {
    /// Write the envelope as one JSON line
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl From<DecisionError> for Envelope {
    fn from(err: DecisionError) -> Self {
        Envelope::Failure(err.to_string())
    }
}

impl From<Result<DecisionResult, DecisionError>> for Envelope {
    fn from(outcome: Result<DecisionResult, DecisionError>) -> Self {
        match outcome {
            Ok(result) => Envelope::Success(result),
            Err(err) => err.into(),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Envelope::Success(result) => {
                state.serialize_field("result", result)?;
                state.serialize_field("error", "")?;
            }
            Envelope::Failure(error) => {
                state.serialize_field("result", &Option::<DecisionResult>::None)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
