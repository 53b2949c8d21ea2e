use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{
        auth::auth_handler, blog::blog_handler, certificates::certificates_handler,
        logo::logo_handler, user::users_handler,
    },
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.config.max_upload_bytes;

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler())
        .nest("/certificates", certificates_handler())
        .nest("/blogs", blog_handler())
        .nest("/logo", logo_handler())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route)
}
