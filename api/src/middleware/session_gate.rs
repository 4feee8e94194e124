//! Request gate middleware enforcing token validity and session activity.
//!
//! Every inbound request runs Classifier -> Verifier -> Oracle in order,
//! with these precedence rules:
//!
//! 1. A token-exempted path skips the whole pipeline; even a malformed
//!    token on such a path is never inspected.
//! 2. A missing/empty token short-circuits before any cryptographic work.
//!    On inactivity-exempt paths a credential-less request is forwarded
//!    instead: health probes and the swagger UI send no Authorization
//!    header at all.
//! 3. A valid token without a subject claim halts with the invalid-claims
//!    kind, never the generic invalid-token kind.
//! 4. The inactivity exemption is evaluated only after token acceptance,
//!    from its own set.
//! 5. An idle session is forced out *before* the rejection is written; this
//!    is the only path on which the gate mutates session state.
//!
//! Store failures during the inactivity check fail closed: the request is
//! rejected, never silently forwarded. Halts answer 401 with a JSON body
//! `{"message": <kind-specific string>}`; passes attach an [`AuthContext`]
//! to the request extensions, which is the only happy-path side effect.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::{header::AUTHORIZATION, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use sg_core::errors::GateError;
use sg_core::repositories::SessionStore;
use sg_core::services::gate::PathPolicy;
use sg_core::services::token::TokenVerifier;

/// Identity context injected into requests that pass the gate
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    /// Session identity (token subject)
    pub subject: String,
    /// Role identifier, when the token carries one
    pub role_id: Option<String>,
    /// User identifier, when the token carries one
    pub user_id: Option<String>,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| actix_web::error::ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// A gate halt carrying its rejection kind; renders as 401 JSON
#[derive(Debug, thiserror::Error)]
#[error("{}", .0.client_message())]
pub struct GateRejection(pub GateError);

#[derive(Serialize)]
struct RejectionBody {
    message: &'static str,
}

impl ResponseError for GateRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(RejectionBody {
            message: self.0.client_message(),
        })
    }
}

/// Session gate middleware factory
pub struct SessionGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    policy: PathPolicy,
    verifier: TokenVerifier,
    store: Arc<dyn SessionStore>,
    inactivity_timeout: u64,
}

impl SessionGate {
    /// Create the gate over a path policy, a verifier and a session store.
    /// `inactivity_timeout` is the gate-side threshold in seconds.
    pub fn new(
        policy: PathPolicy,
        verifier: TokenVerifier,
        store: Arc<dyn SessionStore>,
        inactivity_timeout: u64,
    ) -> Self {
        Self {
            inner: Arc::new(GateInner {
                policy,
                verifier,
                store,
                inactivity_timeout,
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
            inner: Arc::clone(&self.inner),
        }))
    }
}

/// Session gate middleware service
pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
    inner: Arc<GateInner>,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let inner = Arc::clone(&self.inner);

        // Render a halt as its 401 JSON response without leaving the service.
        fn halt<B>(req: ServiceRequest, rejection: GateRejection) -> ServiceResponse<EitherBody<B>> {
            req.into_response(rejection.error_response())
                .map_into_right_body()
        }

        Box::pin(async move {
            let exemptions = inner.policy.classify(req.path());

            // Rule 1: a token-exempted path bypasses everything.
            if exemptions.skip_token_check {
                return service.call(req).await.map(|r| r.map_into_left_body());
            }

            let token = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(TokenVerifier::bearer_token)
                .map(str::to_owned);

            // Rule 2: an absent/empty token halts before any cryptographic
            // work. Inactivity-exempt paths (/health, /swagger, heartbeat)
            // double as unauthenticated probe paths when the request
            // carries no credentials at all.
            let token = match token {
                Some(token) => token,
                None if exemptions.skip_inactivity_check => {
                    return service.call(req).await.map(|r| r.map_into_left_body());
                }
                None => return Ok(halt(req, GateRejection(GateError::MissingToken))),
            };

            // Rule 3 lives inside the verifier: a missing subject is its
            // own kind, never conflated with a malformed token.
            let claims = match inner.verifier.verify(&token) {
                Ok(claims) => claims,
                Err(e) => return Ok(halt(req, GateRejection(e))),
            };

            let subject = match claims.subject().map(str::to_owned) {
                Some(subject) => subject,
                None => return Ok(halt(req, GateRejection(GateError::InvalidClaims))),
            };

            // Rule 4: inactivity exemption applies only after token
            // acceptance.
            if !exemptions.skip_inactivity_check {
                let idle = match inner
                    .store
                    .check_inactive(&subject, inner.inactivity_timeout)
                    .await
                {
                    Ok(idle) => idle,
                    Err(e) => {
                        // Fail closed: a store error rejects the request.
                        log::error!("inactivity check failed for {}: {}", subject, e);
                        return Ok(halt(req, GateRejection(GateError::StoreUnavailable)));
                    }
                };

                if idle {
                    // Rule 5: logout, then reject. The rejection stands even
                    // if the logout write fails; the sweeper will catch up.
                    if let Err(e) = inner.store.force_logout(&subject).await {
                        log::warn!("forced logout of idle session {} failed: {}", subject, e);
                    }
                    return Ok(halt(req, GateRejection(GateError::SessionInactive)));
                }
            }

            req.extensions_mut().insert(AuthContext {
                subject,
                role_id: claims.role,
                user_id: claims.user_id,
            });

            service.call(req).await.map(|r| r.map_into_left_body())
        })
    }
}
