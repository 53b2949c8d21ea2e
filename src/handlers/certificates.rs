use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::{
    handlers::form::FormData,
    middleware::{auth, require_admin},
    models::{
        certificate::{CreateCertificateDto, UpdateCertificateDto},
        response::Response,
    },
    AppState, Result,
};

pub fn certificates_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_certificates).merge(
                post(create_certificate)
                    .route_layer(middleware::from_fn(require_admin))
                    .route_layer(middleware::from_fn(auth)),
            ),
        )
        .route(
            "/{id}",
            get(get_certificate).merge(
                put(update_certificate)
                    .delete(delete_certificate)
                    .route_layer(middleware::from_fn(require_admin))
                    .route_layer(middleware::from_fn(auth)),
            ),
        )
}

async fn get_certificates(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let certificates = app_state.certificates_service.get_certificates().await?;
    Ok((StatusCode::OK, Json(certificates)))
}

async fn get_certificate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(certificate_id): Path<String>,
) -> Result<impl IntoResponse> {
    let certificate = app_state
        .certificates_service
        .get_certificate(&certificate_id)
        .await?;
    Ok((StatusCode::OK, Json(certificate)))
}

async fn create_certificate(
    Extension(app_state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields: CreateCertificateDto = form.fields()?;

    let certificate = app_state
        .certificates_service
        .create_certificate(fields, form.take_file("image"))
        .await?;

    Ok((StatusCode::CREATED, Json(certificate)))
}

async fn update_certificate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(certificate_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields: UpdateCertificateDto = form.fields()?;

    let certificate = app_state
        .certificates_service
        .update_certificate(&certificate_id, fields, form.take_file("image"))
        .await?;

    Ok((StatusCode::OK, Json(certificate)))
}

async fn delete_certificate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(certificate_id): Path<String>,
) -> Result<impl IntoResponse> {
    app_state
        .certificates_service
        .delete_certificate(&certificate_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Response::success("Certificate deleted successfully")),
    ))
}
