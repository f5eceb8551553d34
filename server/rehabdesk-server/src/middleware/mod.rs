//! Middleware modules for request processing

pub mod auth_context;

pub use auth_context::AuthContext;

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer for browser front-ends
///
/// Identity travels in the Authorization header, not cookies, so wildcard
/// origins are safe here.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
