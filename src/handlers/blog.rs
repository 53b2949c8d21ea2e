use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::{
    handlers::form::FormData,
    middleware::{auth, require_admin},
    models::{
        blog::{CreateBlogPostDto, CreateCategoryDto},
        response::Response,
    },
    AppState, Result,
};

pub fn blog_handler() -> Router {
    Router::new()
        .route(
            "/posts",
            get(get_posts).merge(
                post(create_post)
                    .route_layer(middleware::from_fn(require_admin))
                    .route_layer(middleware::from_fn(auth)),
            ),
        )
        .route(
            "/posts/{id}",
            get(get_post).merge(
                delete(delete_post)
                    .route_layer(middleware::from_fn(require_admin))
                    .route_layer(middleware::from_fn(auth)),
            ),
        )
        .route("/posts/{id}/like", post(like_post))
        .route("/posts/{id}/dislike", post(dislike_post))
        .route(
            "/categories",
            get(get_categories).merge(
                post(create_category)
                    .route_layer(middleware::from_fn(require_admin))
                    .route_layer(middleware::from_fn(auth)),
            ),
        )
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.blog_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.blog_service.get_post(&post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields: CreateBlogPostDto = form.fields()?;

    let post = app_state
        .blog_service
        .create_post(fields, form.take_file("image"), form.take_file("video"))
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    app_state.blog_service.delete_post(&post_id).await?;

    Ok((
        StatusCode::OK,
        Json(Response::success("Blog post deleted successfully")),
    ))
}

async fn like_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.blog_service.like(&post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn dislike_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.blog_service.dislike(&post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn get_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let categories = app_state.blog_service.get_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

async fn create_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(category): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse> {
    let category = app_state.blog_service.create_category(category).await?;

    Ok((StatusCode::CREATED, Json(category)))
}
