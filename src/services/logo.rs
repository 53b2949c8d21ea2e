use std::sync::Arc;

use crate::{
    models::{logo::Logo, media::UploadFile},
    repositories::logo_repo::LogoRepository,
    services::media::{ensure_image, MediaStore},
    Error, Result,
};

#[derive(Clone)]
pub struct LogoService {
    repo: Arc<dyn LogoRepository>,
    media: Arc<dyn MediaStore>,
}

impl LogoService {
    pub fn new(repo: Arc<dyn LogoRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { repo, media }
    }

    pub async fn get_logo(&self) -> Result<Logo> {
        self.repo.get_logo().await?.ok_or(Error::NotFound)
    }

    pub async fn upload_logo(&self, image: Option<UploadFile>) -> Result<Logo> {
        let image = image.ok_or_else(|| Error::BadRequest("Logo image is required".to_string()))?;
        ensure_image(&image)?;

        let uploaded = self.media.upload(image).await?;
        let logo = self.repo.set_logo(&uploaded.secure_url).await?;

        tracing::info!(url = %logo.url, "Logo replaced");

        Ok(logo)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;
    use crate::repositories::memory::{FakeMediaStore, MemoryRepo};

    fn logo_file() -> UploadFile {
        UploadFile {
            file_name: "logo.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
        }
    }

    #[tokio::test]
    async fn logo_is_missing_until_uploaded() {
        let service = LogoService::new(
            Arc::new(MemoryRepo::default()),
            Arc::new(FakeMediaStore::default()),
        );

        assert!(matches!(service.get_logo().await, Err(Error::NotFound)));
        assert!(matches!(
            service.upload_logo(None).await,
            Err(Error::BadRequest(_))
        ));

        let first = service.upload_logo(Some(logo_file())).await.unwrap();
        let second = service.upload_logo(Some(logo_file())).await.unwrap();

        assert_ne!(first.url, second.url);
        assert_eq!(service.get_logo().await.unwrap().url, second.url);
    }
}
