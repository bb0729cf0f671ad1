/// HTTP middleware utilities for discussion-service
///
/// Authentication is an extractor rather than a wrapping middleware so that
/// read-only and mutating routes can share one resource: only handlers that
/// declare [`AuthenticatedUser`] pay the token-verification precondition,
/// and those short-circuit with 401 before any service code runs.
use actix_web::http::header;
use actix_web::{web, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use token_auth::{Identity, TokenVerifier};

use crate::error::AppError;

/// Verified caller identity, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| AppError::Internal("token verifier not configured".into()))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = verifier.authenticate(header).map_err(AppError::from)?;

    Ok(AuthenticatedUser(identity))
}
