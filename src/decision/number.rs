// SPDX-License-Identifier: MIT

//! Float literal parsing
//!
//! Accepts:
//! - decimal and exponent forms: `5`, `-0.25`, `1e3`, `.5E-2`
//! - hex mantissa with a binary exponent: `0x1p4`, `0x1.8P-1`
//! - `_` between digits: `1_000.5`, `0x_1p4`
//! - `inf`, `infinity` (optionally signed) and unsigned `nan`, in any case
//!
//! A finite literal whose value overflows `f64` is rejected.

/// Parse a float literal, returning `None` when it is malformed or out of range
pub fn parse_float(s: &str) -> Option<f64> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let sign = if negative { -1.0 } else { 1.0 };

    if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        return Some(sign * f64::INFINITY);
    }
    if s.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }

    let body = if body.contains('_') {
        if !underscores_ok(body) {
            return None;
        }
        body.replace('_', "")
    } else {
        body.to_string()
    };

    let magnitude = match body.get(..2) {
        Some("0x") | Some("0X") => parse_hex(&body[2..])?,
        _ => {
            // Leaves only the plain decimal grammar for `f64::from_str`
            if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return None;
            }
            body.parse::<f64>().ok()?
        }
    };

    if magnitude.is_infinite() {
        return None;
    }
    Some(sign * magnitude)
}

/// `_` may only sit between two digits, or between a `0x` prefix and a digit
fn underscores_ok(body: &str) -> bool {
    #[derive(PartialEq)]
    enum Last {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = body.as_bytes();
    let hex = bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'x';
    let (mut last, rest) = if hex {
        (Last::Digit, &bytes[2..])
    } else {
        (Last::Start, bytes)
    };

    for &b in rest {
        if b.is_ascii_digit() || (hex && matches!(b | 0x20, b'a'..=b'f')) {
            last = Last::Digit;
        } else if b == b'_' {
            if last != Last::Digit {
                return false;
            }
            last = Last::Underscore;
        } else {
            if last == Last::Underscore {
                return false;
            }
            last = Last::Other;
        }
    }
    last != Last::Underscore
}

/// Parse `<hex digits>[.<hex digits>]p[+-]<decimal digits>` (prefix removed)
fn parse_hex(s: &str) -> Option<f64> {
    let (mantissa, exponent) = s.split_once(|c| c == 'p' || c == 'P')?;
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exp = parse_exponent(exponent)?;
    let mut bits: u64 = 0;
    let mut sticky = false;

    for (digits, fractional) in [(int_part, false), (frac_part, true)] {
        for c in digits.chars() {
            let d = u64::from(c.to_digit(16)?);
            // Keep 60 significant bits, enough to round to 53 correctly
            if bits >> 56 == 0 {
                bits = (bits << 4) | d;
                if fractional {
                    exp -= 4;
                }
            } else {
                sticky |= d != 0;
                if !fractional {
                    exp += 4;
                }
            }
        }
    }

    if bits == 0 {
        return Some(0.0);
    }
    if sticky {
        bits |= 1;
    }
    Some(scale_pow2(bits as f64, exp))
}

fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Multiply a positive finite `value` by 2^exp, saturating to inf or zero
fn scale_pow2(mut value: f64, mut exp: i64) -> f64 {
    let step = 2f64.powi(1000);
    while exp > 1000 && value.is_finite() {
        value *= step;
        exp -= 1000;
    }
    while exp < -1000 && value != 0.0 {
        value /= step;
        exp += 1000;
    }
    if exp > 1000 || exp < -1000 {
        return value;
    }
    value * 2f64.powi(exp as i32)
}
