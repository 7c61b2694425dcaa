//! Bearer-token gate for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use clinic_auth_types::identity::principal_from_headers;
use clinic_auth_types::token::AuthError;

use crate::domain::repository::UserRepository;
use crate::state::AppState;

/// Verify the bearer token, confirm its user still exists, and attach the
/// [`Principal`](clinic_auth_types::identity::Principal) to the request.
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = principal_from_headers(request.headers(), &state.jwt_secret).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        e.into_response()
    })?;

    let user = state
        .user_repo()
        .find_by_id(principal.user_id)
        .await
        .map_err(IntoResponse::into_response)?;
    if user.is_none() {
        tracing::debug!(user_id = %principal.user_id, "token names a deleted user");
        return Err(AuthError::UnknownPrincipal.into_response());
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
