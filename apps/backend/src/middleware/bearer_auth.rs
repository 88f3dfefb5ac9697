//! Bearer-token gate for the protected route group.
//!
//! Rules, applied in order:
//! 1. no `Authorization` header (or an empty one): 401 "Authorization header required"
//! 2. value not visible ASCII or not starting with the exact prefix `"Bearer "`:
//!    401 "Invalid authorization header format"
//! 3. nothing after the prefix: 401 "Token required"
//! 4. otherwise the token is verified exactly once; any failure is
//!    401 "Invalid or expired token"
//!
//! The verifier is never consulted for rules 1-3. On success the verified
//! [`Claims`] are stored in request extensions, unchanged, and the request
//! is forwarded. Rejections are plain-text, the failure reason is only
//! logged.

use std::fmt;
use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, ContentType, HeaderValue};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, warn};

use crate::auth::Claims;
use crate::state::app_state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away before reaching its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    MalformedHeader,
    EmptyToken,
    InvalidToken,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::MissingHeader => "Authorization header required",
            Rejection::MalformedHeader => "Invalid authorization header format",
            Rejection::EmptyToken => "Token required",
            Rejection::InvalidToken => "Invalid or expired token",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Apply rules 1-3 to the raw header and return the candidate token.
pub fn extract_bearer(value: Option<&HeaderValue>) -> Result<&str, Rejection> {
    let Some(value) = value else {
        return Err(Rejection::MissingHeader);
    };
    if value.is_empty() {
        return Err(Rejection::MissingHeader);
    }

    let raw = value.to_str().map_err(|_| Rejection::MalformedHeader)?;
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(Rejection::MalformedHeader)?;

    if token.is_empty() {
        return Err(Rejection::EmptyToken);
    }
    Ok(token)
}

fn reject(req: ServiceRequest, rejection: Rejection) -> ServiceResponse {
    let response = HttpResponse::Unauthorized()
        .insert_header(ContentType::plaintext())
        .body(rejection.message());
    req.into_response(response)
}

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // runs inside the request's trace scope and span
        Box::pin(async move {
            let extracted =
                extract_bearer(req.headers().get(header::AUTHORIZATION)).map(str::to_owned);
            let token = match extracted {
                Ok(token) => token,
                Err(rejection) => {
                    debug!(reason = %rejection, "bearer gate rejected request before verification");
                    return Ok(reject(req, rejection).map_into_right_body());
                }
            };

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("AppState missing from app data; bearer gate cannot verify tokens");
                let response = HttpResponse::InternalServerError().finish();
                return Ok(req.into_response(response).map_into_right_body());
            };

            let claims: Claims = match state.auth.verify_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    warn!(reason = %e, "bearer token rejected");
                    return Ok(reject(req, Rejection::InvalidToken).map_into_right_body());
                }
            };

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
