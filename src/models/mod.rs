pub mod genre;
pub mod image_config;
pub mod movie;
pub mod settings;

pub use genre::Genre;
pub use image_config::ImageConfig;
pub use movie::Movie;
pub use settings::AppSettings;

use crate::error::DecodeError;
use serde_json::Value;

// Strict field accessors for decoding TMDB payloads. A key that is absent is
// reported as missing; a key that is present with any other JSON type
// (including null) is reported as the wrong type.

fn field<'a>(json: &'a Value, key: &'static str) -> Result<&'a Value, DecodeError> {
    json.get(key).ok_or(DecodeError::MissingField(key))
}

// Integers may arrive as `329865.0`; only a float with no fractional part
// that fits in an i64 is accepted.
fn as_whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

pub(crate) fn int(json: &Value, key: &'static str) -> Result<i64, DecodeError> {
    as_whole_number(field(json, key)?).ok_or(DecodeError::WrongType(key))
}

pub(crate) fn float(json: &Value, key: &'static str) -> Result<f64, DecodeError> {
    field(json, key)?.as_f64().ok_or(DecodeError::WrongType(key))
}

pub(crate) fn string(json: &Value, key: &'static str) -> Result<String, DecodeError> {
    field(json, key)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or(DecodeError::WrongType(key))
}

pub(crate) fn array<'a>(json: &'a Value, key: &'static str) -> Result<&'a Vec<Value>, DecodeError> {
    field(json, key)?.as_array().ok_or(DecodeError::WrongType(key))
}

pub(crate) fn int_array(json: &Value, key: &'static str) -> Result<Vec<i64>, DecodeError> {
    array(json, key)?
        .iter()
        .map(|v| as_whole_number(v).ok_or(DecodeError::WrongType(key)))
        .collect()
}

pub(crate) fn string_array(json: &Value, key: &'static str) -> Result<Vec<String>, DecodeError> {
    array(json, key)?
        .iter()
        .map(|v| {
            v.as_str()
                .map(|s| s.to_string())
                .ok_or(DecodeError::WrongType(key))
        })
        .collect()
}

pub(crate) fn optional_string(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(Value::as_str).map(|s| s.to_string())
}
