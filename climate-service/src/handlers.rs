//! HTTP request handlers for the climate service.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use climate::{record, ClimateRecord, FieldErrors};

use crate::AppState;

/// Fixed temperature reading served by the GET endpoint, in degrees Celsius.
pub const TEMPERATURE_READING: f64 = 25.0;

/// Fixed humidity reading served by the GET endpoint, in percent.
pub const HUMIDITY_READING: f64 = 60.0;

/// Temperature reading response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemperatureResponse {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

/// Humidity reading response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HumidityResponse {
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// Climate record submission payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClimateDataRequest {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent (0.0 to 100.0).
    pub humidity: f64,
    /// Measurement timestamp (RFC 3339). Defaults to the insertion time.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Persisted climate record response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClimateDataResponse {
    /// Store-assigned record identifier.
    pub id: i64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Measurement timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl From<ClimateRecord> for ClimateDataResponse {
    fn from(record: ClimateRecord) -> Self {
        Self {
            id: record.id,
            temperature: record.temperature,
            humidity: record.humidity,
            recorded_at: record.recorded_at,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Get the current temperature reading.
///
/// Always returns the fixed reading with `200 OK`; the endpoint performs no
/// I/O and has no failure path. Request bodies and query parameters are
/// ignored.
#[utoipa::path(
    get,
    path = "/temperature",
    tag = "readings",
    responses(
        (status = 200, description = "Current temperature reading", body = TemperatureResponse)
    )
)]
pub async fn get_temperature() -> Json<TemperatureResponse> {
    tracing::debug!(temperature = TEMPERATURE_READING, "Temperature read");
    Json(TemperatureResponse {
        temperature: TEMPERATURE_READING,
    })
}

/// Get the current humidity reading.
///
/// Always returns the fixed reading with `200 OK`.
#[utoipa::path(
    get,
    path = "/humidity",
    tag = "readings",
    responses(
        (status = 200, description = "Current humidity reading", body = HumidityResponse)
    )
)]
pub async fn get_humidity() -> Json<HumidityResponse> {
    tracing::debug!(humidity = HUMIDITY_READING, "Humidity read");
    Json(HumidityResponse {
        humidity: HUMIDITY_READING,
    })
}

/// Submit a climate record.
///
/// The body is validated against the record schema before anything is
/// written; a rejected payload never touches the store.
///
/// # Returns
///
/// - `201 Created` with the persisted record, including its identifier
/// - `400 Bad Request` with a field-to-messages map when validation fails
/// - `500 Internal Server Error` when the store rejects the write
#[utoipa::path(
    post,
    path = "/api/climate-data",
    tag = "records",
    request_body = ClimateDataRequest,
    responses(
        (status = 201, description = "Record created", body = ClimateDataResponse),
        (status = 400, description = "Validation failed; maps field names to error messages", body = FieldErrors),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn post_climate_data(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    // The payload arrives untyped so that a wrong-typed field produces a
    // per-field message instead of a bare deserialization rejection.
    let draft = match record::validate(&payload) {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!(
                fields = ?errors.keys().collect::<Vec<_>>(),
                "Climate payload rejected"
            );
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }
    };

    match state.store.insert(&draft) {
        Ok(record) => {
            tracing::info!(
                id = record.id,
                temperature = record.temperature,
                humidity = record.humidity,
                "Climate record created"
            );
            (
                StatusCode::CREATED,
                Json(ClimateDataResponse::from(record)),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Climate record insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_response_serialize() {
        let response = TemperatureResponse {
            temperature: TEMPERATURE_READING,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"temperature":25.0}"#);
    }

    #[test]
    fn test_humidity_response_serialize() {
        let response = HumidityResponse {
            humidity: HUMIDITY_READING,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"humidity":60.0}"#);
    }

    #[test]
    fn test_climate_data_request_deserialize() {
        let json = r#"{"temperature": 25.0, "humidity": 60.0}"#;
        let request: ClimateDataRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.temperature, 25.0);
        assert_eq!(request.humidity, 60.0);
        assert!(request.recorded_at.is_none());
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
