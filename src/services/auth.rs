use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::{
    config::AdminSeed,
    models::users::{NewUser, User, UserRole},
    repositories::user_repo::UserRepository,
    services::user::Claims,
    Error, Result,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expiration: i64,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        jwt_expiration: i64,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(Error::Unauthorized)?;

        let argon2 = Argon2::default();
        let parsed_hash = PasswordHash::new(&user.password)?;
        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| Error::Unauthorized)?;

        tracing::info!(user_id = %user.id, "User logged in");

        self.generate_token(user.id)
    }

    /// Creates the configured admin account unless that email is already taken.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<Option<User>> {
        if self.user_repo.find_by_email(&seed.email).await?.is_some() {
            tracing::info!(email = %seed.email, "Admin user already exists");
            return Ok(None);
        }

        let user = self
            .user_repo
            .create_user(
                Uuid::now_v7(),
                NewUser {
                    name: seed.name.clone(),
                    email: seed.email.clone(),
                    password_hash: hash_password(&seed.password)?,
                    role: UserRole::Admin,
                    title: seed.title.clone(),
                    bio: seed.bio.clone(),
                    phone_no: seed.phone_no.clone(),
                    address: seed.address.clone(),
                },
            )
            .await?;

        tracing::info!(email = %user.email, "Admin user created");

        Ok(Some(user))
    }

    pub fn generate_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.jwt_expiration)).timestamp() as usize;
        let iat = now.timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| Error::InternalServerError)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}
