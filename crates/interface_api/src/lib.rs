//! HTTP API Layer
//!
//! This crate provides the REST API for the SWIFT directory using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for health and SWIFT code routes
//! - **Middleware**: Request ids, tracing, request logging, CORS
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Routes
//!
//! | Method | Path | |
//! |--------|------|-|
//! | GET | `/health` | liveness |
//! | GET | `/health/ready` | record store health |
//! | GET | `/v1/swift-codes/:swift_code` | headquarters with branches, or a branch |
//! | GET | `/v1/swift-codes/country/:country_iso2` | all codes of a country |
//! | POST | `/v1/swift-codes` | create |
//! | DELETE | `/v1/swift-codes/:swift_code` | delete |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_directory::DirectoryService;

use crate::config::ApiConfig;
use crate::handlers::{health, swift_codes};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DirectoryService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Directory service wired to a record store
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: DirectoryService, config: ApiConfig) -> Router {
    let state = AppState {
        service: Arc::new(service),
        config,
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let swift_code_routes = Router::new()
        .route("/v1/swift-codes", post(swift_codes::create_swift_code))
        .route("/v1/swift-codes/", post(swift_codes::create_swift_code))
        .route(
            "/v1/swift-codes/:swift_code",
            get(swift_codes::get_swift_code).delete(swift_codes::delete_swift_code),
        )
        .route(
            "/v1/swift-codes/country/:country_iso2",
            get(swift_codes::get_country_swift_codes),
        );

    Router::new()
        .merge(health_routes)
        .merge(swift_code_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(axum_middleware::from_fn(request_logging_middleware))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
