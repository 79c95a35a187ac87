use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated principal, rebuilt from the token on every request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub team: Option<String>,
    pub team_name: Option<String>,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            team: claims.team,
            team_name: claims.team_name,
            is_admin: claims.is_admin,
        }
    }
}

impl AuthUser {
    /// Resolve the request credential to a principal
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let token = extract_token(headers)?;
        let claims = auth::validate_jwt(&token).map_err(|e| {
            tracing::debug!("Rejected credential: {}", e);
            ApiError::unauthorized("Invalid or expired token")
        })?;
        Ok(Self::from(claims))
    }

    /// Elevate to an admin principal or fail with 403
    pub fn require_admin(self) -> Result<AdminUser, ApiError> {
        if self.is_admin {
            Ok(AdminUser(self))
        } else {
            tracing::warn!("Admin check failed for user '{}'", self.username);
            Err(ApiError::forbidden("Admin privileges required"))
        }
    }
}

/// Principal that passed the admin check
#[derive(Clone, Debug, PartialEq)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_headers(&parts.headers)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_headers(&parts.headers)?.require_admin()
    }
}

/// Bearer header first, then the auth cookie
fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
            None => Err(ApiError::unauthorized("Authorization header must use Bearer token format")),
        };
    }

    let cookie_name = &config::config().security.auth_cookie_name;
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}
