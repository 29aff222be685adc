//! Loose value coercions shared by the store and the request router.
//!
//! Incoming payloads are untyped: a status flag may arrive as `true`, `"1"`,
//! `"TRUE"` or `0`, and an id may arrive as `"42"`, `"42abc"` or `42`. The
//! functions here pin down exactly how each of those is interpreted.

use serde_json::Value;

use super::TicketId;

/// Derive a ticket status flag from a raw caller-supplied value.
///
/// Text is matched against a whitelist: after lower-casing, only `"true"`
/// and `"1"` yield `true`. Every other kind of value uses [`is_truthy`].
/// The two branches must stay separate: `"false"` and `"0"` are non-empty
/// text, so plain truthiness would turn them into `true`.
pub fn coerce_status(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::String(text)) => {
            let lowered = text.to_lowercase();
            lowered == "true" || lowered == "1"
        }
        other => other.is_some_and(is_truthy),
    }
}

/// Truthiness of a payload value.
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty
/// arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a payload value as ticket text. Strings are taken verbatim, other
/// values use their JSON form (`5` becomes `"5"`).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Parse the leading integer of `text`, ignoring anything after it.
///
/// Leading whitespace and a single `+`/`-` sign are accepted, followed by
/// either a `0x`/`0X` hex literal or decimal digits. Parsing stops at the
/// first character that is not a digit. Returns `None` when no digit is
/// found or the value does not fit in an `i64`.
///
/// ```
/// use ticketdesk_core::ticket::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("42abc"), Some(42));
/// assert_eq!(parse_int_prefix("  -7"), Some(-7));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        value = value
            .checked_mul(i64::from(radix))?
            .checked_add(i64::from(digit))?;
        seen_digit = true;
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Interpret a payload value as a ticket id.
///
/// The value is parsed from its textual form with [`parse_int_prefix`], so
/// `"42abc"` and `42.9` both resolve to 42. An array is read from its
/// comma-joined elements, so `[3]` resolves to 3 and `[1, 2]` to 1. Values
/// that do not parse, or that are negative, cannot name a stored ticket and
/// yield `None`.
pub fn ticket_id_from_value(value: &Value) -> Option<TicketId> {
    let parsed = match value {
        Value::String(text) => parse_int_prefix(text),
        Value::Number(number) => parse_int_prefix(&number.to_string()),
        Value::Array(items) => parse_int_prefix(&joined_text(items)),
        _ => None,
    }?;
    TicketId::try_from(parsed).ok()
}

// Null elements render as empty text and objects as an opaque marker.
fn joined_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Array(nested) => joined_text(nested),
            Value::Object(_) => "[object Object]".to_string(),
            other => value_to_text(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}
