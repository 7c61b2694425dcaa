//! Bearer-token principal and its extractor.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::request::Parts;
use http::{HeaderMap, StatusCode};
use uuid::Uuid;

use crate::token::{AuthError, validate_access_token};

/// Authenticated caller, derived from a verified access token.
///
/// The auth gate inserts it into request extensions; handlers take it as an
/// extractor. Extraction fails with 401 on routes the gate does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

/// Raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
}

/// Verify the bearer header and return the principal it names.
///
/// Only establishes identity; whether the user still exists is the caller's check.
pub fn principal_from_headers(headers: &HeaderMap, secret: &str) -> Result<Principal, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingCredential)?;
    let info = validate_access_token(&token, secret)?;
    Ok(Principal {
        user_id: info.user_id,
    })
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    // Resolve synchronously and hand back a 'static future (see axum-core 0.5 signature).
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = parts.extensions.get::<Principal>().copied();
        async move { principal.ok_or(AuthError::MissingCredential) }
    }
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential | Self::UnknownPrincipal => "UNAUTHORIZED",
            Self::InvalidSignature | Self::Malformed => "INVALID_TOKEN",
            Self::Expired => "TOKEN_EXPIRED",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
