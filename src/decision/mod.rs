// SPDX-License-Identifier: MIT

//! Single-expression decision evaluation
//!
//! A run reads one parameter document, extracts the decision fields and
//! compares them with one of three evaluators:
//! - `numeric`: `5 > 3`, `1e3 == 1000`
//! - `string`: `'hello world' endswith 'world'`
//! - `boolean`: `yes`, `0`, `n`

mod ast;
mod envelope;
mod evaluator;
mod number;
mod parser;

pub use ast::{CompareOp, DecisionRequest, DecisionType};
pub use envelope::{DecisionResult, Envelope};
pub use evaluator::{evaluate, evaluate_boolean, evaluate_numeric, evaluate_string};
pub use number::parse_float;
pub use parser::{decode, extract, Param, ParameterSet};

use std::io::{Read, Write};

/// Evaluate a parameter set into an envelope
pub fn decide(params: &[Param]) -> Envelope {
    let request = extract(params);
    log::debug!("Extracted request: {:?}", request);

    let outcome = evaluate(&request).map(|decision| DecisionResult::new(&request, decision));
    match &outcome {
        Ok(result) => log::info!("Decision: {}", result.message),
        Err(err) => log::warn!("Evaluation failed: {}", err),
    }
    outcome.into()
}

/// Decode a document from `input`, evaluate it and write the envelope to
/// `output`.
///
/// Decode and evaluation failures are reported inside the envelope; only
/// write failures are returned.
pub fn run<R: Read, W: Write>(input: R, output: W) -> std::io::Result<()> {
    let envelope = match decode(input) {
        Ok(params) => decide(&params),
        Err(err) => {
            log::warn!("{}", err);
            Envelope::from(err)
        }
    };
    envelope.write_to(output)
}
