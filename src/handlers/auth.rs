use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use tower_cookies::Cookie;
use tower_http::cors::CorsLayer;
use validator::Validate;

use crate::{
    models::{
        response::Response,
        users::{LoginUserDto, UserLoginResponseDto},
    },
    AppState, Error, Result,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// CORS for the public site and the admin dashboard, which send the token cookie.
pub fn configure_cors(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(user): Json<LoginUserDto>,
) -> Result<impl IntoResponse> {
    user.validate()?;

    let token = app_state
        .auth_service
        .login(&user.email, &user.password)
        .await?;

    let cookie_duration = time::Duration::minutes(app_state.config.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
    })
    .into_response();

    let cookie: HeaderValue = cookie
        .to_string()
        .parse()
        .map_err(|_| Error::InternalServerError)?;
    response.headers_mut().append(header::SET_COOKIE, cookie);

    Ok(response)
}

pub async fn logout() -> Result<impl IntoResponse> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut response = Json(Response::success("Logged out")).into_response();

    let cookie: HeaderValue = cookie
        .to_string()
        .parse()
        .map_err(|_| Error::InternalServerError)?;
    response.headers_mut().append(header::SET_COOKIE, cookie);

    Ok(response)
}
