use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared_models::validation::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_SLOT_FORMAT: &str = "%H:%M";

/// Decodes a JSON request body into a request struct. Missing fields and
/// wrong types surface as `ValidationError::Malformed`.
pub fn decode_body<T: DeserializeOwned>(payload: Value) -> Result<T, ValidationError> {
    serde_json::from_value(payload).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Present-but-blank counts as missing.
pub fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

pub fn require_each(field: &'static str, values: Vec<String>) -> Result<Vec<String>, ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::InvalidField {
            field,
            reason: "must not contain blank entries".to_string(),
        });
    }
    Ok(values)
}

/// Returns the date in canonical `YYYY-MM-DD` form.
pub fn parse_date(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| ValidationError::InvalidField {
            field,
            reason: format!("must be a calendar date in YYYY-MM-DD form, got '{}'", value),
        })
}

/// Date used as a list filter. Values that are not dates are kept as given
/// and simply match nothing.
pub fn date_filter(value: &str) -> String {
    parse_date("date", value).unwrap_or_else(|_| value.to_string())
}

/// A slot token. Times of day are rewritten as zero-padded `HH:MM` so that
/// `9:00` and `09:00` name the same slot; any other non-blank token is kept
/// as given (trimmed).
pub fn parse_time_slot(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let token = value.trim();
    if token.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    Ok(NaiveTime::parse_from_str(token, TIME_SLOT_FORMAT)
        .map(|time| time.format(TIME_SLOT_FORMAT).to_string())
        .unwrap_or_else(|_| token.to_string()))
}

pub fn parse_time_slots(field: &'static str, values: &[String]) -> Result<Vec<String>, ValidationError> {
    values
        .iter()
        .map(|value| {
            parse_time_slot(field, value).map_err(|_| ValidationError::InvalidField {
                field,
                reason: "must not contain blank entries".to_string(),
            })
        })
        .collect()
}
