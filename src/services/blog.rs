use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{
        blog::{BlogPost, Category, CreateBlogPostDto, CreateCategoryDto, NewBlogPost, Reaction},
        media::UploadFile,
    },
    repositories::blog_repo::BlogRepository,
    services::{
        media::{ensure_image, MediaStore},
        parse_id,
    },
    Error, Result,
};

#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
    media: Arc<dyn MediaStore>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { repo, media }
    }

    pub async fn get_posts(&self) -> Result<Vec<BlogPost>> {
        self.repo.get_posts().await
    }

    pub async fn get_post(&self, post_id: &str) -> Result<BlogPost> {
        let post_id = parse_id(post_id)?;

        self.repo.get_post(post_id).await?.ok_or(Error::NotFound)
    }

    pub async fn create_post(
        &self,
        post: CreateBlogPostDto,
        image: Option<UploadFile>,
        video: Option<UploadFile>,
    ) -> Result<BlogPost> {
        post.validate()?;
        let category_ids = parse_category_ids(&post.categories)?;

        if let Some(image) = &image {
            ensure_image(image)?;
        }

        let image = match image {
            Some(file) => Some(self.media.upload(file).await?.secure_url),
            None => None,
        };
        let video = match video {
            Some(file) => Some(self.media.upload(file).await?.secure_url),
            None => None,
        };

        let post = self
            .repo
            .create_post(
                Uuid::now_v7(),
                NewBlogPost {
                    title: post.title,
                    content: post.content,
                    image,
                    video,
                    category_ids,
                },
            )
            .await?;

        tracing::info!(post_id = %post.id, "Blog post created");

        Ok(post)
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let post_id = parse_id(post_id)?;

        if !self.repo.delete_post(post_id).await? {
            return Err(Error::NotFound);
        }

        tracing::info!(%post_id, "Blog post deleted");

        Ok(())
    }

    /// Records one reaction and returns the post as stored afterwards.
    pub async fn react(&self, post_id: &str, reaction: Reaction) -> Result<BlogPost> {
        let post_id = parse_id(post_id)?;

        let post = self
            .repo
            .increment_reaction(post_id, reaction)
            .await?
            .ok_or(Error::NotFound)?;

        tracing::debug!(
            %post_id,
            ?reaction,
            likes = post.likes,
            dislikes = post.dislikes,
            "Reaction recorded"
        );

        Ok(post)
    }

    pub async fn like(&self, post_id: &str) -> Result<BlogPost> {
        self.react(post_id, Reaction::Like).await
    }

    pub async fn dislike(&self, post_id: &str) -> Result<BlogPost> {
        self.react(post_id, Reaction::Dislike).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.repo.get_categories().await
    }

    pub async fn create_category(&self, category: CreateCategoryDto) -> Result<Category> {
        let category = CreateCategoryDto {
            name: category.name.trim().to_string(),
        };
        category.validate()?;

        let category = self
            .repo
            .create_category(Uuid::now_v7(), &category.name)
            .await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(category)
    }
}

fn parse_category_ids(raw: &str) -> Result<Vec<Uuid>> {
    let mut ids = Vec::new();

    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        let id = Uuid::parse_str(id)
            .map_err(|_| Error::BadRequest(format!("Unknown category: {id}")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;
    use crate::repositories::memory::{FakeMediaStore, MemoryRepo};

    fn service() -> (BlogService, Arc<MemoryRepo>, Arc<FakeMediaStore>) {
        let repo = Arc::new(MemoryRepo::default());
        let media = Arc::new(FakeMediaStore::default());
        (BlogService::new(repo.clone(), media.clone()), repo, media)
    }

    fn category(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected() {
        let (service, _, _) = service();

        for name in ["", "   ", "\t\n"] {
            assert!(matches!(
                service.create_category(category(name)).await,
                Err(Error::BadRequest(_))
            ));
        }

        let created = service.create_category(category("  Rust  ")).await.unwrap();
        assert_eq!(created.name, "Rust");
        assert_eq!(service.get_categories().await.unwrap(), vec![created]);
    }

    #[test]
    fn category_ids_keep_order_and_drop_duplicates() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let ids = parse_category_ids(&format!("{b}, {a},,{b}")).unwrap();
        assert_eq!(ids, vec![b, a]);
        assert!(parse_category_ids("").unwrap().is_empty());
        assert!(matches!(
            parse_category_ids("rust"),
            Err(Error::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_reactions_are_all_counted() {
        let (service, repo, _) = service();
        let post_id = repo.insert_post("Atomic counters").id.to_string();

        let mut tasks = Vec::new();
        for i in 0..50 {
            let service = service.clone();
            let post_id = post_id.clone();
            tasks.push(tokio::spawn(async move {
                if i % 5 == 0 {
                    service.dislike(&post_id).await
                } else {
                    service.like(&post_id).await
                }
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let post = service.get_post(&post_id).await.unwrap();
        assert_eq!(post.likes, 40);
        assert_eq!(post.dislikes, 10);
    }

    #[tokio::test]
    async fn reaction_returns_the_updated_post() {
        let (service, repo, _) = service();
        let post_id = repo.insert_post("Hello").id.to_string();

        let post = service.like(&post_id).await.unwrap();
        assert_eq!((post.likes, post.dislikes), (1, 0));

        let post = service.dislike(&post_id).await.unwrap();
        assert_eq!((post.likes, post.dislikes), (1, 1));
    }

    #[tokio::test]
    async fn reacting_to_a_missing_post_changes_nothing() {
        let (service, repo, _) = service();
        let existing = repo.insert_post("Untouched");

        for id in ["abc".to_string(), Uuid::now_v7().to_string()] {
            assert!(matches!(service.like(&id).await, Err(Error::NotFound)));
            assert!(matches!(service.dislike(&id).await, Err(Error::NotFound)));
        }

        let posts = service.get_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!((posts[0].likes, posts[0].dislikes), (0, 0));
        assert_eq!(posts[0].id, existing.id);
    }

    #[tokio::test]
    async fn create_populates_categories_and_uploads_media() {
        let (service, _, media) = service();
        let rust = service.create_category(category("Rust")).await.unwrap();
        let web = service.create_category(category("Web")).await.unwrap();

        let post = service
            .create_post(
                CreateBlogPostDto {
                    title: "Axum in production".to_string(),
                    content: "<p>notes</p>".to_string(),
                    categories: format!("{},{}", web.id, rust.id),
                },
                Some(UploadFile {
                    file_name: "cover.png".to_string(),
                    content_type: Some("image/png".to_string()),
                    bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
                }),
                Some(UploadFile {
                    file_name: "demo.mp4".to_string(),
                    content_type: Some("video/mp4".to_string()),
                    bytes: Bytes::from_static(b"\0\0\0\x18ftypmp42"),
                }),
            )
            .await
            .unwrap();

        assert_eq!(post.categories, vec![web, rust]);
        assert_eq!(media.received(), vec!["cover.png", "demo.mp4"]);
        assert!(post.image.is_some() && post.video.is_some());
        assert_eq!((post.likes, post.dislikes), (0, 0));

        let fetched = service.get_post(&post.id.to_string()).await.unwrap();
        assert_eq!(fetched.categories.len(), 2);
    }

    #[tokio::test]
    async fn create_requires_title_and_content() {
        let (service, _, media) = service();

        let result = service
            .create_post(CreateBlogPostDto::default(), None, None)
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));
        assert_eq!(media.upload_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_category_is_rejected() {
        let (service, _, _) = service();
        service.create_category(category("Rust")).await.unwrap();

        assert!(matches!(
            service.create_category(category(" Rust ")).await,
            Err(Error::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let (service, repo, _) = service();
        let post = repo.insert_post("Short lived");

        service.delete_post(&post.id.to_string()).await.unwrap();
        assert!(matches!(
            service.delete_post(&post.id.to_string()).await,
            Err(Error::NotFound)
        ));
    }
}
