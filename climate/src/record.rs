//! Climate record schema and payload validation.
//!
//! This module is the single source of truth for the record's field names,
//! types, and constraints. [`validate`] turns an untyped JSON payload into a
//! typed [`ClimateDraft`], or a map of per-field error messages when the
//! payload does not match the schema.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Field name for the temperature reading.
pub const FIELD_TEMPERATURE: &str = "temperature";

/// Field name for the humidity reading.
pub const FIELD_HUMIDITY: &str = "humidity";

/// Field name for the optional measurement timestamp.
pub const FIELD_RECORDED_AT: &str = "recorded_at";

/// Key used for errors that apply to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Inclusive bounds for relative humidity (percent).
const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Per-field validation messages, keyed by field name.
///
/// A `BTreeMap` keeps field order stable across runs, which keeps error
/// bodies deterministic.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A validated, typed, not-yet-persisted climate record.
///
/// Produced only by [`validate`]; the identifier is assigned later by the
/// store at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateDraft {
    /// Temperature in decimal degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent (0.0 to 100.0).
    pub humidity: f64,
    /// Measurement timestamp; the store stamps the insertion time when `None`.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A persisted climate record, including its store-assigned identifier.
///
/// This is the canonical representation returned to callers after a
/// successful insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateRecord {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Temperature in decimal degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Measurement timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Validate an untyped JSON payload against the climate record schema.
///
/// Checks that the payload is a JSON object, that every required field is
/// present and numeric, that humidity lies within 0.0 to 100.0, and that
/// `recorded_at` (if given) is an RFC 3339 timestamp. All failures are
/// collected; the result is either a complete draft or the full error map,
/// never a partial draft.
pub fn validate(raw: &Value) -> Result<ClimateDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(object) = raw.as_object() else {
        errors.insert(
            NON_FIELD_ERRORS.to_string(),
            vec!["Invalid data. Expected a JSON object.".to_string()],
        );
        return Err(errors);
    };

    let temperature = number_field(object, FIELD_TEMPERATURE, &mut errors);
    let humidity = number_field(object, FIELD_HUMIDITY, &mut errors);

    if let Some(value) = humidity {
        let (min, max) = HUMIDITY_RANGE;
        if !(min..=max).contains(&value) {
            field_error(
                &mut errors,
                FIELD_HUMIDITY,
                format!("Ensure this value is between {min} and {max}."),
            );
        }
    }

    let recorded_at = datetime_field(object, FIELD_RECORDED_AT, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // A missing or malformed field always records an error for itself, so
    // both values are present once the error map is empty.
    Ok(ClimateDraft {
        temperature: temperature.unwrap_or_default(),
        humidity: humidity.unwrap_or_default(),
        recorded_at,
    })
}

/// Extract a required numeric field, recording errors for absence or a
/// non-numeric value. Numeric strings (e.g. `"25.5"`) are accepted.
fn number_field(
    object: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match object.get(field) {
        None | Some(Value::Null) => {
            field_error(errors, field, "This field is required.".to_string());
            None
        }
        Some(value) => match as_number(value) {
            Some(number) => Some(number),
            None => {
                field_error(errors, field, "A valid number is required.".to_string());
                None
            }
        },
    }
}

/// Extract the optional `recorded_at` field as an RFC 3339 timestamp.
fn datetime_field(
    object: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));
            if parsed.is_none() {
                field_error(
                    errors,
                    field,
                    "Datetime has wrong format. Use an RFC 3339 timestamp instead.".to_string(),
                );
            }
            parsed
        }
    }
}

/// Interpret a JSON value as a finite number, accepting numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn field_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
