//! Climate Service Library
//!
//! HTTP handlers and types for the climate readings service.
//! This library is used by both the climate-service binary and integration tests.

pub mod handlers;

use climate::ClimateStore;

/// Application state shared across handlers.
pub struct AppState {
    /// Store for persisted climate records.
    pub store: ClimateStore,
}

// Re-export commonly used types for convenience
pub use handlers::{
    ClimateDataRequest, ClimateDataResponse, ErrorResponse, HealthResponse, HumidityResponse,
    TemperatureResponse,
};
