use crate::api::state::AppState;
use crate::security::errors::AuthError;
use crate::security::jwt::AdminClaims;
use crate::services::errors::ServiceError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

/// Admin routes take the session as `Authorization: Bearer <token>`.
impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                tracing::warn!("Missing or malformed authorization header");
                ServiceError::from(AuthError::MissingToken)
            })?;

        let claims = state
            .jwt
            .decode_token::<AdminClaims>(bearer.token())
            .map_err(|e| {
                tracing::warn!("Token decoding error: {:?}", e);
                ServiceError::from(e)
            })?;

        Ok(claims)
    }
}
