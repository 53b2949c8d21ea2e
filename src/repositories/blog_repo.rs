use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    models::blog::{BlogPost, Category, NewBlogPost, Reaction},
    Error, Result,
};

use super::{db_error_code, PostgresRepo};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

// Categories are aggregated in their display order so a post comes back fully populated.
const POST_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.content,
        p.image,
        p.video,
        p.likes,
        p.dislikes,
        COALESCE(
            json_agg(json_build_object('id', c.id, 'name', c.name) ORDER BY pc.position)
                FILTER (WHERE c.id IS NOT NULL),
            '[]'::json
        ) AS categories,
        p.created_at
    FROM blog_posts p
    LEFT JOIN blog_post_categories pc ON pc.post_id = p.id
    LEFT JOIN categories c ON c.id = pc.category_id
"#;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn get_posts(&self) -> Result<Vec<BlogPost>>;
    async fn get_post(&self, post_id: Uuid) -> Result<Option<BlogPost>>;
    async fn create_post(&self, post_id: Uuid, post: NewBlogPost) -> Result<BlogPost>;
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;
    /// Adds one to the reaction counter in a single statement; `None` when the post is missing.
    async fn increment_reaction(&self, post_id: Uuid, reaction: Reaction)
        -> Result<Option<BlogPost>>;
    async fn get_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, category_id: Uuid, name: &str) -> Result<Category>;
}

#[async_trait]
impl BlogRepository for PostgresRepo {
    async fn get_posts(&self) -> Result<Vec<BlogPost>> {
        let sql = format!("{POST_SELECT} GROUP BY p.id ORDER BY p.created_at DESC, p.id DESC");

        let posts = sqlx::query_as::<_, BlogPost>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn get_post(&self, post_id: Uuid) -> Result<Option<BlogPost>> {
        tracing::debug!("Fetching blog post by ID: {}", post_id);

        let sql = format!("{POST_SELECT} WHERE p.id = $1 GROUP BY p.id");

        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn create_post(&self, post_id: Uuid, post: NewBlogPost) -> Result<BlogPost> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, content, image, video)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image)
        .bind(&post.video)
        .execute(&mut *tx)
        .await?;

        for (position, category_id) in post.category_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO blog_post_categories (post_id, category_id, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(post_id)
            .bind(category_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(|err| match db_error_code(&err).as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => {
                    Error::BadRequest(format!("Unknown category: {category_id}"))
                }
                _ => Error::from(err),
            })?;
        }

        tx.commit().await?;

        self.get_post(post_id)
            .await?
            .ok_or(Error::InternalServerError)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_reaction(
        &self,
        post_id: Uuid,
        reaction: Reaction,
    ) -> Result<Option<BlogPost>> {
        let column = reaction.column();
        let sql = format!("UPDATE blog_posts SET {column} = {column} + 1 WHERE id = $1");

        let result = sqlx::query(&sql)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_post(post_id).await
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    async fn create_category(&self, category_id: Uuid, name: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING id, name
            "#,
        )
        .bind(category_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match db_error_code(&err).as_deref() {
            Some(UNIQUE_VIOLATION) => Error::BadRequest("Category already exists".to_string()),
            _ => Error::from(err),
        })
    }
}
