use std::sync::Arc;

use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    models::users::{User, UserRole},
    AppState, Error, Result,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JWTAuthMiddeware {
    pub user: User,
}

/// Resolves the caller from the `token` cookie or a `Bearer` header.
pub async fn auth(mut req: Request, next: Next) -> Result<impl IntoResponse> {
    let app_state = req
        .extensions()
        .get::<Arc<AppState>>()
        .cloned()
        .ok_or(Error::InternalServerError)?;

    let cookies = CookieJar::from_headers(req.headers());

    let token = cookies
        .get("token")
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|stripped| stripped.to_string())
                })
        })
        .ok_or(Error::Unauthorized)?;

    let user_id = app_state
        .users_service
        .decode_token(token)
        .map_err(|_| Error::Unauthorized)?;

    let user = app_state
        .users_service
        .get_user(user_id)
        .await
        .map_err(|err| match err {
            Error::NotFound => Error::Unauthorized,
            other => other,
        })?;

    req.extensions_mut().insert(JWTAuthMiddeware { user });

    Ok(next.run(req).await)
}

pub async fn role_check(
    req: Request,
    next: Next,
    required_roles: &[UserRole],
) -> Result<impl IntoResponse> {
    let user = req
        .extensions()
        .get::<JWTAuthMiddeware>()
        .ok_or(Error::Unauthorized)?;

    if !required_roles.contains(&user.user.role) {
        return Err(Error::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Must run after [`auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<impl IntoResponse> {
    role_check(req, next, &[UserRole::Admin]).await
}
