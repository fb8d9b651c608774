//! Coercions from SM header value text to scalars.
//!
//! SM files written with European locale tools use `,` as the decimal
//! separator, so [`parse_double`] normalizes commas before converting.

use super::SmError;

/// Coerces a value to an integer.
///
/// # Errors
///
/// Returns [`SmError::InvalidInt`] when the text is not a decimal integer.
pub fn parse_int(value: &str) -> Result<i32, SmError> {
    value.parse().map_err(|_| SmError::InvalidInt {
        value: value.to_owned(),
    })
}

/// Coerces a value to a floating-point number, accepting `,` as the
/// decimal separator.
///
/// # Errors
///
/// Returns [`SmError::InvalidFloat`] when the text is not numeric.
pub fn parse_double(value: &str) -> Result<f64, SmError> {
    value
        .replace(',', ".")
        .parse()
        .map_err(|_| SmError::InvalidFloat {
            value: value.to_owned(),
        })
}

/// Coerces a value to a boolean: `YES`/`1` and `NO`/`0`, case-insensitive.
///
/// # Errors
///
/// Returns [`SmError::InvalidBool`] for any other text.
pub fn parse_bool(value: &str) -> Result<bool, SmError> {
    if value.eq_ignore_ascii_case("YES") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("NO") || value == "0" {
        Ok(false)
    } else {
        Err(SmError::InvalidBool {
            value: value.to_owned(),
        })
    }
}

/// Reads the `BPMS`/`STOPS` micro-grammar: `<double><sep><double>` tuples,
/// any single non-numeric character serving as separator between the two
/// numbers and between pairs.
///
/// Scanning stops silently where the grammar stops matching, so garbage
/// ends the list instead of failing it, and a trailing separator is
/// tolerated.
#[must_use]
pub fn parse_pair_list(value: &str) -> Vec<(f64, f64)> {
    let mut pairs = Vec::new();
    let mut rest = value;
    loop {
        let Some((beat, after_beat)) = scan_double(rest) else {
            break;
        };
        let Some(after_sep) = scan_separator(after_beat) else {
            break;
        };
        let Some((second, after_second)) = scan_double(after_sep) else {
            break;
        };
        pairs.push((beat, second));
        match scan_separator(after_second) {
            Some(after) => rest = after,
            None => break,
        }
    }
    pairs
}

/// Takes the longest numeric prefix (after leading whitespace) and parses
/// it. `None` when the prefix is empty or not a number.
fn scan_double(input: &str) -> Option<(f64, &str)> {
    let input = input.trim_start();
    let end = input
        .find(|c: char| !matches!(c, '0'..='9' | '.' | '+' | '-'))
        .unwrap_or(input.len());
    let number = input[..end].parse().ok()?;
    Some((number, &input[end..]))
}

/// Consumes one separator character after leading whitespace.
fn scan_separator(input: &str) -> Option<&str> {
    let input = input.trim_start();
    let mut chars = input.chars();
    chars.next()?;
    Some(chars.as_str())
}
