//! # Rusty-Posts Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_web::{web, App, HttpServer};
use rp_api::handlers::AppState;
use rp_api::{configure_routes, middleware};
use settings::Settings;

// Feature-gated imports: the storage plugin is chosen at compile time
#[cfg(feature = "db-sqlite")]
use rp_db_sqlite::SqlitePostRepo;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("rusty-posts needs a storage plugin; enable the `db-sqlite` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log_level.as_str()));

    // 1. Initialize Database Implementation (creates the schema if absent)
    #[cfg(feature = "db-sqlite")]
    let repo = SqlitePostRepo::connect(&settings.database_url, settings.max_connections).await?;

    // 2. Wrap in AppState (dynamic dispatch keeps handlers plugin-agnostic)
    let state = web::Data::new(AppState { repo: Box::new(repo) });

    let (host, port) = settings.bind_address();
    log::info!("Rusty-Posts starting on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
