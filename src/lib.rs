// SPDX-License-Identifier: MIT

//! decision-rs evaluates one boolean decision read as JSON from a stream.

pub mod decision;
pub mod error;

pub use decision::{decide, run, DecisionResult, Envelope};
pub use error::DecisionError;
