use std::sync::Arc;

use axum::{
    extract::Multipart,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    handlers::form::FormData,
    middleware::{auth, require_admin},
    AppState, Result,
};

pub fn logo_handler() -> Router {
    Router::new().route(
        "/",
        get(get_logo).merge(
            post(upload_logo)
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(middleware::from_fn(auth)),
        ),
    )
}

async fn get_logo(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let logo = app_state.logo_service.get_logo().await?;
    Ok((StatusCode::OK, Json(logo)))
}

async fn upload_logo(
    Extension(app_state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;

    let logo = app_state
        .logo_service
        .upload_logo(form.take_file("image"))
        .await?;

    Ok((StatusCode::OK, Json(logo)))
}
