use std::{net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use config::Config;
use handlers::auth::configure_cors;
use repositories::PostgresRepo;
use routes::create_routes;
use services::{
    auth::AuthService, blog::BlogService, certificates::CertificatesService, logo::LogoService,
    media::CloudinaryStore, user::UserService,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub users_service: UserService,
    pub certificates_service: CertificatesService,
    pub blog_service: BlogService,
    pub logo_service: LogoService,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("🔥 Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let media = match CloudinaryStore::new(&config.cloudinary) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::error!("🔥 Failed to build the media store client: {:?}", err);
            std::process::exit(1);
        }
    };

    let db = Arc::new(PostgresRepo::new(pool));

    let app_state = AppState {
        config: config.clone(),
        auth_service: AuthService::new(
            db.clone(),
            config.jwt_secret.clone(),
            config.jwt_maxage,
        ),
        users_service: UserService::new(db.clone(), config.jwt_secret.clone()),
        certificates_service: CertificatesService::new(db.clone(), media.clone()),
        blog_service: BlogService::new(db.clone(), media.clone()),
        logo_service: LogoService::new(db, media),
    };

    if let Some(seed) = &config.admin_seed {
        if let Err(err) = app_state.auth_service.seed_admin(seed).await {
            tracing::error!("🔥 Failed to seed the admin user: {:?}", err);
            std::process::exit(1);
        }
    }

    let origin = match HeaderValue::from_str(&config.client_url) {
        Ok(origin) => origin,
        Err(err) => {
            tracing::error!("🔥 CLIENT_URL is not a valid origin: {:?}", err);
            std::process::exit(1);
        }
    };

    let app = create_routes(Arc::new(app_state)).layer(configure_cors(origin));

    let addr = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind {}: {:?}", addr, err);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Listening on {}", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("🔥 Server error: {:?}", err);
        std::process::exit(1);
    }
}
