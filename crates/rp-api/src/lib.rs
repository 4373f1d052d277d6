//! # rp-api
//!
//! The web routing and orchestration layer for Rusty-Posts.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod responses;

use actix_web::web;

/// Configures the routes for the posts API.
///
/// # Developer Note
/// Kept as a `ServiceConfig` function so the binary and the tests mount the
/// exact same surface.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/posts")
                    .route(web::get().to(handlers::list_posts))
                    .route(web::post().to(handlers::create_post)),
            )
            .service(
                web::resource("/posts/{post_id}")
                    .route(web::get().to(handlers::get_post))
                    .route(web::put().to(handlers::update_post))
                    .route(web::delete().to(handlers::delete_post)),
            )
            .route("/comments", web::get().to(handlers::list_comments)),
    );
}
