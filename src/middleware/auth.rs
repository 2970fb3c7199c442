use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    error::{AppError, AppResult},
    models::User,
    routes::AppState,
};

/// The signed-in user. Rejects the request with 401 when the bearer token
/// is missing, malformed, expired or belongs to a deleted account.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// The signed-in user if a valid bearer token was sent, otherwise `None`
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth.authenticate(token).await?;
        Ok(Self(user))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Ok(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        match state.auth.authenticate(token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid token on optional route");
                Ok(Self(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/profile");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
        assert!(matches!(
            bearer_token(&parts(None)),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Basic dXNlcjpwYXNz"))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Bearer "))),
            Err(AppError::Unauthorized(_))
        ));
    }
}
