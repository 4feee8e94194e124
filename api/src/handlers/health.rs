//! Health check endpoint

use actix_web::HttpResponse;

/// Liveness endpoint; inactivity-exempt by path policy so heartbeat-less
/// monitoring probes never terminate their own session.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "session-guard",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
