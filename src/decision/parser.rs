//! Input decoding and field extraction
//!
//! Reads documents like:
//! - `{"params": [{"inputname": "decisiontype", "compvalue": "numeric"}, ...]}`
//!
//! and folds the parameter list into a [`DecisionRequest`].
//!
//! Decoding merges each JSON value into the value already decoded for the
//! same field: object keys match case-insensitively, a `null` leaves the
//! target untouched, and a repeated key decodes over the earlier one.

use super::ast::DecisionRequest;
use crate::error::DecisionError;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::io::Read;

/// One name/value pair from the input document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub input_name: String,
    pub comp_value: String,
}

impl Param {
    pub fn new(input_name: impl Into<String>, comp_value: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            comp_value: comp_value.into(),
        }
    }
}

/// Ordered parameter list. Names may repeat.
pub type ParameterSet = Vec<Param>;

#[derive(Debug, Default)]
struct DecisionInput {
    params: ParameterSet,
}

impl<'de> Deserialize<'de> for DecisionInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut input = DecisionInput::default();
        Merge(&mut input).deserialize(deserializer)?;
        Ok(input)
    }
}

/// Decodes a JSON value into an existing value
struct Merge<'a, T>(&'a mut T);

/// Object key comparison under simple Unicode case folding
fn key_matches(key: &str, field: &str) -> bool {
    fn fold_eq(a: char, b: char) -> bool {
        a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
    }

    key == field
        || (key.chars().count() == field.chars().count()
            && key.chars().zip(field.chars()).all(|(a, b)| fold_eq(a, b)))
}

impl<'de> DeserializeSeed<'de> for Merge<'_, DecisionInput> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de> Visitor<'de> for Merge<'_, DecisionInput> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a params list")
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let input = self.0;
        while let Some(key) = map.next_key::<String>()? {
            if key_matches(&key, "params") {
                map.next_value_seed(Merge(&mut input.params))?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Merge<'_, ParameterSet> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de> Visitor<'de> for Merge<'_, ParameterSet> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of parameters")
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.0.clear();
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        // Elements already present are decoded over; the list ends at the
        // length of the new array.
        let params = self.0;
        let mut len = 0;
        loop {
            if len == params.len() {
                params.push(Param::default());
            }
            if seq.next_element_seed(Merge(&mut params[len]))?.is_none() {
                break;
            }
            len += 1;
        }
        params.truncate(len);
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Merge<'_, Param> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de> Visitor<'de> for Merge<'_, Param> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with inputname and compvalue")
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let param = self.0;
        while let Some(key) = map.next_key::<String>()? {
            if key_matches(&key, "inputname") {
                map.next_value_seed(Merge(&mut param.input_name))?;
            } else if key_matches(&key, "compvalue") {
                map.next_value_seed(Merge(&mut param.comp_value))?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Merge<'_, String> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de> Visitor<'de> for Merge<'_, String> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        *self.0 = String::deserialize(deserializer)?;
        Ok(())
    }
}

/// Decode the first JSON document from `reader` into a parameter set.
///
/// Anything after the first document is left unread. A top-level `null`
/// yields an empty set; an empty stream is reported as `EOF`.
pub fn decode<R: Read>(reader: R) -> Result<ParameterSet, DecisionError> {
    let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<DecisionInput>();

    match stream.next() {
        Some(input) => Ok(input?.params),
        None => Err(DecisionError::decode("EOF")),
    }
}

/// Lower-case each character on its own, without context-dependent rules
/// such as final sigma. `İ` maps to a plain `i`.
pub fn lowercase_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\u{130}' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Fold a parameter set into a request. Later entries overwrite earlier ones.
pub fn extract(params: &[Param]) -> DecisionRequest {
    let mut request = DecisionRequest::default();

    for param in params {
        let value = param.comp_value.trim();
        match param.input_name.as_str() {
            "decisiontype" => request.decision_type = lowercase_chars(value),
            "leftvalue" => request.left_value = value.to_string(),
            "rightvalue" => request.right_value = value.to_string(),
            "operator" => request.operator = value.to_string(),
            other => log::trace!("Ignoring unrecognized parameter: {}", other),
        }
    }

    request
}
