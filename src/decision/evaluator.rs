//! Decision evaluator
//!
//! Routes a request to the numeric, string or boolean comparison.

use super::ast::{CompareOp, DecisionRequest, DecisionType};
use super::number::parse_float;
use super::parser::lowercase_chars;
use crate::error::DecisionError;

/// Evaluate a request with the evaluator selected by its decision type
pub fn evaluate(request: &DecisionRequest) -> Result<bool, DecisionError> {
    let decision_type: DecisionType = request.decision_type.parse()?;
    log::info!("Evaluating {} decision", decision_type);

    match decision_type {
        DecisionType::Numeric => {
            evaluate_numeric(&request.left_value, &request.right_value, &request.operator)
        }
        DecisionType::String => Ok(evaluate_string(
            &request.left_value,
            &request.right_value,
            &request.operator,
        )),
        DecisionType::Boolean => evaluate_boolean(&request.left_value),
    }
}

/// Compare two values as 64-bit floats.
///
/// The left operand is validated before the right one, and both before the
/// operator.
pub fn evaluate_numeric(left: &str, right: &str, operator: &str) -> Result<bool, DecisionError> {
    let left_num = parse_float(left)
        .ok_or_else(|| DecisionError::InvalidLeftNumeric(left.to_string()))?;
    let right_num = parse_float(right)
        .ok_or_else(|| DecisionError::InvalidRightNumeric(right.to_string()))?;

    let unknown = || DecisionError::UnknownOperator(operator.to_string());
    let op = CompareOp::parse(operator).ok_or_else(unknown)?;
    log::debug!("Numeric compare: {} {} {}", left_num, op, right_num);

    match op {
        CompareOp::Eq => Ok(left_num == right_num),
        CompareOp::NotEq => Ok(left_num != right_num),
        CompareOp::Gt => Ok(left_num > right_num),
        CompareOp::Gte => Ok(left_num >= right_num),
        CompareOp::Lt => Ok(left_num < right_num),
        CompareOp::Lte => Ok(left_num <= right_num),
        CompareOp::Contains | CompareOp::StartsWith | CompareOp::EndsWith => Err(unknown()),
    }
}

/// Compare two strings. Never fails: an unrecognized operator yields `false`.
pub fn evaluate_string(left: &str, right: &str, operator: &str) -> bool {
    let op = match CompareOp::parse(operator) {
        Some(op) => op,
        None => {
            log::warn!("Unknown string operator '{}', deciding false", operator);
            return false;
        }
    };
    log::debug!("String compare: {:?} {} {:?}", left, op, right);

    match op {
        CompareOp::Eq => left == right,
        CompareOp::NotEq => left != right,
        CompareOp::Contains => left.contains(right),
        CompareOp::StartsWith => left.starts_with(right),
        CompareOp::EndsWith => left.ends_with(right),
        CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
            log::warn!("Operator '{}' does not apply to strings, deciding false", op);
            false
        }
    }
}

/// Interpret a single value as a boolean
pub fn evaluate_boolean(value: &str) -> Result<bool, DecisionError> {
    let value = lowercase_chars(value);
    match value.as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" | "" => Ok(false),
        _ => Err(DecisionError::InvalidBoolean(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(decision_type: &str, left: &str, op: &str, right: &str) -> DecisionRequest {
        DecisionRequest {
            decision_type: decision_type.to_string(),
            left_value: left.to_string(),
            right_value: right.to_string(),
            operator: op.to_string(),
        }
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(evaluate(&request("numeric", "5", ">", "3")), Ok(true));
        assert_eq!(
            evaluate(&request("string", "hello world", "endswith", "world")),
            Ok(true)
        );
        assert_eq!(evaluate(&request("boolean", "n", "", "")), Ok(false));
    }

    #[test]
    fn test_dispatch_unknown_type() {
        assert_eq!(
            evaluate(&request("unknown", "1", "==", "1")),
            Err(DecisionError::UnknownDecisionType("unknown".to_string()))
        );
        assert_eq!(
            evaluate(&request("", "1", "==", "1")),
            Err(DecisionError::UnknownDecisionType(String::new()))
        );
    }

    #[test]
    fn test_numeric_operators() {
        assert_eq!(evaluate_numeric("2", "2.0", "=="), Ok(true));
        assert_eq!(evaluate_numeric("2", "2.0", "="), Ok(true));
        assert_eq!(evaluate_numeric("2", "3", "!="), Ok(true));
        assert_eq!(evaluate_numeric("2", "2", "<>"), Ok(false));
        assert_eq!(evaluate_numeric("7.5", "5", ">"), Ok(true));
        assert_eq!(evaluate_numeric("7.5", "7.5", ">="), Ok(true));
        assert_eq!(evaluate_numeric("-1", "0", "<"), Ok(true));
        assert_eq!(evaluate_numeric("8", "7.5", "<="), Ok(false));
    }

    #[test]
    fn test_numeric_exponent_notation() {
        assert_eq!(evaluate_numeric("1e3", "1000", "=="), Ok(true));
        assert_eq!(evaluate_numeric("2.5E-1", "0.25", "=="), Ok(true));
        assert_eq!(evaluate_numeric("+4", "4", "=="), Ok(true));
    }

    #[test]
    fn test_numeric_nan_is_not_special_cased() {
        assert_eq!(evaluate_numeric("NaN", "NaN", "=="), Ok(false));
        assert_eq!(evaluate_numeric("NaN", "NaN", "!="), Ok(true));
        assert_eq!(evaluate_numeric("NaN", "1", "<"), Ok(false));
    }

    #[test]
    fn test_numeric_invalid_left_takes_precedence() {
        assert_eq!(
            evaluate_numeric("abc", "xyz", ">"),
            Err(DecisionError::InvalidLeftNumeric("abc".to_string()))
        );
        assert_eq!(
            evaluate_numeric("", "1", ">"),
            Err(DecisionError::InvalidLeftNumeric(String::new()))
        );
    }

    #[test]
    fn test_numeric_overflow_is_invalid() {
        assert_eq!(
            evaluate_numeric("1e400", "1", ">"),
            Err(DecisionError::InvalidLeftNumeric("1e400".to_string()))
        );
        assert_eq!(
            evaluate_numeric("-1e400", "1", "<"),
            Err(DecisionError::InvalidLeftNumeric("-1e400".to_string()))
        );
        assert_eq!(
            evaluate_numeric("1", "1e400", "<"),
            Err(DecisionError::InvalidRightNumeric("1e400".to_string()))
        );
        assert_eq!(
            evaluate_numeric("1", "-1e400", ">"),
            Err(DecisionError::InvalidRightNumeric("-1e400".to_string()))
        );
    }

    #[test]
    fn test_numeric_infinity_literal_is_accepted() {
        assert_eq!(evaluate_numeric("inf", "1e308", ">"), Ok(true));
        assert_eq!(evaluate_numeric("-Infinity", "-1e308", "<"), Ok(true));
    }

    #[test]
    fn test_numeric_hex_literal() {
        assert_eq!(evaluate_numeric("0x1p4", "16", "=="), Ok(true));
        assert_eq!(evaluate_numeric("0x1.8p1", "3", ">="), Ok(true));
    }

    #[test]
    fn test_numeric_invalid_right() {
        assert_eq!(
            evaluate_numeric("1", "1,5", ">"),
            Err(DecisionError::InvalidRightNumeric("1,5".to_string()))
        );
    }

    #[test]
    fn test_numeric_operands_checked_before_operator() {
        assert_eq!(
            evaluate_numeric("1", "x", "~"),
            Err(DecisionError::InvalidRightNumeric("x".to_string()))
        );
    }

    #[test]
    fn test_numeric_unknown_operator() {
        assert_eq!(
            evaluate_numeric("1", "2", "=>"),
            Err(DecisionError::UnknownOperator("=>".to_string()))
        );
        assert_eq!(
            evaluate_numeric("12", "1", "contains"),
            Err(DecisionError::UnknownOperator("contains".to_string()))
        );
    }

    #[test]
    fn test_string_operators() {
        assert!(evaluate_string("abc", "abc", "=="));
        assert!(evaluate_string("abc", "abc", "="));
        assert!(!evaluate_string("abc", "ABC", "=="));
        assert!(evaluate_string("abc", "abd", "!="));
        assert!(!evaluate_string("abc", "abc", "<>"));
        assert!(evaluate_string("hello world", "lo wo", "contains"));
        assert!(!evaluate_string("hello", "world", "contains"));
        assert!(evaluate_string("hello world", "hello", "startswith"));
        assert!(!evaluate_string("hello world", "world", "startswith"));
        assert!(evaluate_string("hello world", "world", "endswith"));
    }

    #[test]
    fn test_string_empty_right() {
        assert!(evaluate_string("abc", "", "contains"));
        assert!(evaluate_string("abc", "", "startswith"));
        assert!(evaluate_string("", "", "=="));
    }

    #[test]
    fn test_string_unknown_operator_is_false() {
        assert!(!evaluate_string("b", "a", ">"));
        assert!(!evaluate_string("abc", "abc", "Contains"));
        assert!(!evaluate_string("abc", "abc", ""));
    }

    #[test]
    fn test_boolean_values() {
        for value in ["true", "1", "yes", "y", "TRUE", "Yes", "Y"] {
            assert_eq!(evaluate_boolean(value), Ok(true), "value {:?}", value);
        }
        for value in ["false", "0", "no", "n", "", "FALSE", "No", "N"] {
            assert_eq!(evaluate_boolean(value), Ok(false), "value {:?}", value);
        }
    }

    #[test]
    fn test_boolean_invalid_reports_lowercased() {
        assert_eq!(
            evaluate_boolean("maybe"),
            Err(DecisionError::InvalidBoolean("maybe".to_string()))
        );
        assert_eq!(
            evaluate_boolean("MAYBE").unwrap_err().to_string(),
            "invalid boolean value: maybe"
        );
        assert!(evaluate_boolean("2").is_err());
    }

    #[test]
    fn test_boolean_lowercases_per_char() {
        assert_eq!(
            evaluate_boolean("\u{130}"),
            Err(DecisionError::InvalidBoolean("i".to_string()))
        );
        assert_eq!(evaluate_boolean("Y\u{130}"), Err(DecisionError::InvalidBoolean("yi".to_string())));
    }

    #[test]
    fn test_boolean_ignores_right_and_operator() {
        assert_eq!(evaluate(&request("boolean", "yes", "nonsense", "x")), Ok(true));
        assert_eq!(evaluate(&request("boolean", "0", "==", "1")), Ok(false));
    }

    fn numeric_op() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["==", "=", "!=", "<>", ">", ">=", "<", "<="])
    }

    proptest! {
        #[test]
        fn test_numeric_matches_native_comparison(
            a in prop::num::f64::NORMAL | prop::num::f64::ZERO,
            b in prop::num::f64::NORMAL | prop::num::f64::ZERO,
            op in numeric_op(),
        ) {
            let expected = match op {
                "==" | "=" => a == b,
                "!=" | "<>" => a != b,
                ">" => a > b,
                ">=" => a >= b,
                "<" => a < b,
                "<=" => a <= b,
                _ => unreachable!(),
            };
            let result = evaluate_numeric(&a.to_string(), &b.to_string(), op);
            prop_assert_eq!(result, Ok(expected));
        }

        #[test]
        fn test_numeric_reflexive_equality(a in prop::num::f64::NORMAL) {
            let s = a.to_string();
            prop_assert_eq!(evaluate_numeric(&s, &s, "=="), Ok(true));
            prop_assert_eq!(evaluate_numeric(&s, &s, "<="), Ok(true));
            prop_assert_eq!(evaluate_numeric(&s, &s, "<"), Ok(false));
        }

        #[test]
        fn test_string_is_total(left in ".*", right in ".*", op in ".*") {
            // Must return without panicking for any operator
            let _ = evaluate_string(&left, &right, &op);
        }

        #[test]
        fn test_string_equality_agrees_with_inequality(left in "[a-c]{0,3}", right in "[a-c]{0,3}") {
            prop_assert_eq!(
                evaluate_string(&left, &right, "=="),
                !evaluate_string(&left, &right, "!=")
            );
        }
    }
}
