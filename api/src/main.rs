//! SessionGuard server binary.
//!
//! Wires the session store, the request gate and the background sweeper
//! together. Startup aborts if the store connection string or the token
//! signing key is missing; the sweeper is started once and stopped via a
//! watch signal when the HTTP server exits.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use tokio::sync::watch;

use sg_core::repositories::SessionStore;
use sg_core::services::gate::PathPolicy;
use sg_core::services::session::{Sweeper, SweeperConfig};
use sg_core::services::token::TokenVerifier;
use sg_infra::{connect_pool, MySqlSessionStore};

use sg_api::config::Config;
use sg_api::handlers;
use sg_api::middleware::SessionGate;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Fail fast: no store connection string or signing key, no server.
    let config = Config::from_env().context("invalid configuration")?;

    info!("Starting SessionGuard server");

    let pool = connect_pool(&config.database)
        .await
        .context("failed to connect to the session store")?;
    let store = Arc::new(MySqlSessionStore::new(pool));

    // Singleton sweeper for the process lifetime.
    let sweeper = Arc::new(Sweeper::new(
        Arc::clone(&store),
        SweeperConfig {
            interval_seconds: config.session.sweep_interval,
            timeout_seconds: config.session.sweep_timeout,
            failure_backoff_seconds: sg_shared::config::session::SWEEP_FAILURE_BACKOFF_SECONDS,
        },
    ));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_handle = sweeper.spawn(shutdown_rx);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let gate_store: Arc<dyn SessionStore> = store;
    let session_config = config.session.clone();
    let jwt_secret = config.auth.jwt_secret().to_string();

    let server = HttpServer::new(move || {
        let gate = SessionGate::new(
            PathPolicy::standard(),
            TokenVerifier::new(&jwt_secret),
            Arc::clone(&gate_store),
            session_config.inactivity_timeout,
        );

        App::new()
            .wrap(Logger::default())
            .wrap(gate)
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/api").route("/session/me", web::get().to(handlers::session_info)),
            )
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run();

    let result = server.await;

    // Stop the sweeper within its current cycle, not after a full interval.
    let _ = shutdown_tx.send(true);
    let _ = sweeper_handle.await;

    result.context("server error")
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
