use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{models::users::User, repositories::user_repo::UserRepository, Error, Result};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    jwt_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self { repo, jwt_secret }
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        let user = self.repo.get_user(user_id).await?;
        let user = user.ok_or(Error::NotFound)?;
        Ok(user)
    }

    /// Owner profile shown on the public site.
    pub async fn get_profile(&self) -> Result<User> {
        self.repo.find_admin().await?.ok_or(Error::NotFound)
    }

    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<Uuid> {
        let decode = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthorized)?;

        Uuid::parse_str(&decode.claims.sub).map_err(|_| Error::Unauthorized)
    }
}
