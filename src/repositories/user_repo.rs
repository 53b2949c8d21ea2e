use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    models::users::{NewUser, User},
    Result,
};

use super::PostgresRepo;

const USER_COLUMNS: &str = r#"
    id, name, email, password, role, title, bio, phone_no, address, created_at, updated_at
"#;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// The site owner's account, used for the public profile.
    async fn find_admin(&self) -> Result<Option<User>>;
    async fn create_user(&self, user_id: Uuid, user: NewUser) -> Result<User>;
}

#[async_trait]
impl UserRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        tracing::debug!("Fetching user by ID: {}", user_id);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        tracing::info!(user_found = user.is_some(), "User query completed");

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        tracing::debug!("Fetching user by email: {}", email);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_admin(&self) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = 'admin' ORDER BY created_at ASC LIMIT 1"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_user(&self, user_id: Uuid, user: NewUser) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (id, name, email, password, role, title, bio, phone_no, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role)
            .bind(user.title)
            .bind(user.bio)
            .bind(user.phone_no)
            .bind(user.address)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }
}
