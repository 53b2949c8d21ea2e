use async_trait::async_trait;

use crate::{models::logo::Logo, Result};

use super::PostgresRepo;

#[async_trait]
pub trait LogoRepository: Send + Sync {
    async fn get_logo(&self) -> Result<Option<Logo>>;
    /// Replaces the site logo; the previous URL is not kept.
    async fn set_logo(&self, url: &str) -> Result<Logo>;
}

#[async_trait]
impl LogoRepository for PostgresRepo {
    async fn get_logo(&self) -> Result<Option<Logo>> {
        let logo = sqlx::query_as::<_, Logo>("SELECT url, updated_at FROM site_logo WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(logo)
    }

    async fn set_logo(&self, url: &str) -> Result<Logo> {
        let logo = sqlx::query_as::<_, Logo>(
            r#"
            INSERT INTO site_logo (id, url, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE
            SET url = EXCLUDED.url, updated_at = EXCLUDED.updated_at
            RETURNING url, updated_at
            "#,
        )
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(logo)
    }
}
