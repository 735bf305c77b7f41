//! Climate Service - HTTP microservice for climate readings.
//!
//! A small REST API serving fixed temperature and humidity readings and
//! accepting climate-data submissions into a SQLite database.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CLIMATE_DB_PATH` | SQLite database file | `climate.db` |
//! | `CLIMATE_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /temperature` - Current temperature reading
//! - `GET /humidity` - Current humidity reading
//! - `POST /api/climate-data` - Submit a climate record
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use climate::ClimateStore;
use climate_service::{handlers, AppState};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the climate service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate Service",
        version = "0.1.0",
        description = "REST API for climate readings and climate-data submission.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_temperature,
        handlers::get_humidity,
        handlers::post_climate_data,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::TemperatureResponse,
            handlers::HumidityResponse,
            handlers::ClimateDataRequest,
            handlers::ClimateDataResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "readings", description = "Scalar climate readings"),
        (name = "records", description = "Climate record submission"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("CLIMATE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let db_path = std::env::var("CLIMATE_DB_PATH").unwrap_or_else(|_| {
        tracing::warn!("CLIMATE_DB_PATH not set, using ./climate.db");
        "climate.db".to_string()
    });

    let store = ClimateStore::open(&db_path)?;

    tracing::info!(db_path = %db_path, port = port, "Starting climate service");

    let state = Arc::new(AppState { store });

    // Build router
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/temperature", get(handlers::get_temperature))
        .route("/humidity", get(handlers::get_humidity))
        .route("/api/climate-data", post(handlers::post_climate_data))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
