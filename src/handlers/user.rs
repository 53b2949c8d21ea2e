use std::sync::Arc;

use axum::{middleware, response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    middleware::{auth, JWTAuthMiddeware},
    models::users::{FilterUserDto, UserData, UserResponseDto},
    AppState, Result,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me).route_layer(middleware::from_fn(auth)))
        .route("/profile", get(get_profile))
}

fn user_response(user: FilterUserDto) -> UserResponseDto {
    UserResponseDto {
        status: "success".to_string(),
        data: UserData { user },
    }
}

async fn get_me(Extension(user): Extension<JWTAuthMiddeware>) -> Result<impl IntoResponse> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    Ok(Json(user_response(filtered_user)))
}

async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let owner = app_state.users_service.get_profile().await?;

    Ok(Json(user_response(FilterUserDto::filter_user(&owner))))
}
