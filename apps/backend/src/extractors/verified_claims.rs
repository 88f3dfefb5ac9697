use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use tracing::warn;

use crate::auth::Claims;
use crate::error::AppError;

/// Claims the bearer gate verified for this request.
///
/// Only resolvable on routes mounted behind `BearerAuth`; anywhere else the
/// extractor fails with a 401 problem response.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims(pub Claims);

impl VerifiedClaims {
    pub fn into_inner(self) -> Claims {
        self.0
    }
}

impl Deref for VerifiedClaims {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for VerifiedClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();

        ready(match claims {
            Some(claims) => Ok(VerifiedClaims(claims)),
            None => {
                warn!(path = %req.path(), "VerifiedClaims requested on a route without BearerAuth");
                Err(AppError::unauthorized())
            }
        })
    }
}
