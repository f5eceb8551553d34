//! RehabDesk Server - rehabilitation center administration API
//!
//! This library provides the HTTP surface of the RehabDesk Engine:
//! authentication context extraction, role-based authorization at every
//! operation boundary, and RESTful endpoints over the record store and the
//! finance/payroll/allowance services.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::{RehabDeskServer, ServerConfig};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: RehabDeskServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer()),
        )
        .with_state(server)
}
