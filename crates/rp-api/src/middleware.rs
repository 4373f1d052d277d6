//! rusty-posts/crates/rp-api/src/middleware.rs Middleware
//!
//! Access logging and CORS for the Rusty-Posts API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Access log in actix's default format (peer address, request line,
/// status, size, referrer, user agent, elapsed time).
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing) for every verb the API serves.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .max_age(3600)
}
