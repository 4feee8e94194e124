//! Session introspection endpoint

use actix_web::HttpResponse;

use crate::middleware::AuthContext;

/// Echoes the identity context the gate attached to the request. Downstream
/// business handlers consume the same extractor.
pub async fn session_info(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth)
}
