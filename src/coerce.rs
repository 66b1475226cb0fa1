use crate::compat::{String, ToString, format};
use crate::field::{Field, FieldKind};
use serde_json::{Number, Value};

/// Decode raw query text into a value of the field kind.
/// Failure details are short and stable so they can be matched in
/// validation output.
pub(crate) fn decode_raw(kind: FieldKind, raw: &str) -> core::result::Result<Value, String> {
    match kind {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Number => parse_number(raw),
        FieldKind::Integer => parse_integer(raw),
        FieldKind::Flag => parse_flag(raw),
        FieldKind::Json => {
            serde_json::from_str(raw).map_err(|_| "not valid JSON text".to_string())
        }
    }
}

fn parse_number(raw: &str) -> core::result::Result<Value, String> {
    let Ok(parsed) = raw.parse::<f64>() else {
        return Err("not a number".to_string());
    };
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| "not a finite number".to_string())
}

fn parse_integer(raw: &str) -> core::result::Result<Value, String> {
    raw.parse::<i64>()
        .map(|parsed| Value::Number(parsed.into()))
        .map_err(|_| "not an integer".to_string())
}

fn parse_flag(raw: &str) -> core::result::Result<Value, String> {
    match raw {
        "" | "true" | "1" => Ok(Value::Bool(true)),
        "false" | "0" => Ok(Value::Bool(false)),
        _ => Err("not a boolean flag".to_string()),
    }
}

/// Check that a value has the field's kind shape and satisfies its
/// constraints. Evaluation runs this on freshly decoded values; schema
/// construction runs it on declared fallbacks.
pub(crate) fn vet(field: &Field, value: &Value) -> core::result::Result<(), String> {
    match field.kind {
        FieldKind::Text => {
            let Some(text) = value.as_str() else {
                return Err("not a string".to_string());
            };
            let length = text.chars().count();
            if let Some(min_len) = field.min_len {
                if length < min_len {
                    return Err(format!("shorter than {min_len} characters"));
                }
            }
            if let Some(max_len) = field.max_len {
                if length > max_len {
                    return Err(format!("longer than {max_len} characters"));
                }
            }
            if let Some(one_of) = &field.one_of {
                if !one_of.iter().any(|allowed| allowed == text) {
                    return Err("not one of the allowed values".to_string());
                }
            }
            Ok(())
        }
        FieldKind::Number => {
            let Some(number) = value.as_f64() else {
                return Err("not a number".to_string());
            };
            check_bounds(number, field)
        }
        FieldKind::Integer => {
            let Some(integer) = value.as_i64() else {
                return Err("not an integer".to_string());
            };
            check_bounds(integer as f64, field)
        }
        FieldKind::Flag => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err("not a boolean".to_string())
            }
        }
        FieldKind::Json => Ok(()),
    }
}

fn check_bounds(number: f64, field: &Field) -> core::result::Result<(), String> {
    if let Some(min) = field.min {
        if number < min {
            return Err(format!("below minimum {min}"));
        }
    }
    if let Some(max) = field.max {
        if number > max {
            return Err(format!("above maximum {max}"));
        }
    }
    Ok(())
}

/// Encode an update value as raw query text for a field kind.
///
/// `Json` fields always carry compact JSON text, strings included, which
/// keeps the write path the exact inverse of [`decode_raw`]. Every other
/// kind (and keys outside the schema) writes strings bare and non-strings
/// as their JSON literal.
pub(crate) fn encode_value(kind: Option<FieldKind>, value: &Value) -> String {
    match kind {
        Some(FieldKind::Json) => value.to_string(),
        _ => match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}
