//! Figures Server Library
//!
//! HTTP front end for the external pdffigures2 extraction tool. The crate
//! exposes its modules for integration tests; the server binary is in
//! main.rs.
//!
//! # Modules
//!
//! - `extract`: figure extraction service wrapping the external tool
//! - `download`: remote PDF acquisition
//! - `validate`: PDF path validation
//! - `routes`: HTTP boundary

pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod validate;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Assemble the application router. Shared between the binary and tests.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::extract::router())
        .merge(routes::visualize::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
