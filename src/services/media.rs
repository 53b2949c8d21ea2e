use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::{
    config::CloudinaryConfig,
    models::media::{UploadFile, UploadedMedia},
    Error, Result,
};

/// Remote object store for uploaded images and videos.
///
/// Every call creates a new remote object, even for identical content.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<UploadedMedia>;
}

#[derive(Clone)]
pub struct CloudinaryStore {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryResponse {
    secure_url: Option<String>,
    error: Option<CloudinaryError>,
}

#[derive(Debug, Deserialize)]
struct CloudinaryError {
    message: String,
}

impl CloudinaryStore {
    pub fn new(config: &CloudinaryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/auto/upload",
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(&self, file: UploadFile) -> Result<UploadedMedia> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", self.folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let mut part =
            multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = part_mime(file.content_type.as_deref()) {
            part = part.mime_str(content_type.as_ref())?;
        }

        let form = multipart::Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.folder.clone())
            .text("signature", signature);

        tracing::debug!(file = %file.file_name, "Uploading media");

        let response = self.client.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();

        let body: CloudinaryResponse = response.json().await.map_err(|err| {
            tracing::error!("Malformed media store response: {:?}", err);
            Error::UploadFailure("malformed response from media store".to_string())
        })?;

        if !status.is_success() {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("media store returned {status}"));
            tracing::error!(%status, "Media store rejected upload: {}", message);
            return Err(Error::UploadFailure(message));
        }

        let secure_url = body.secure_url.ok_or_else(|| {
            tracing::error!("Media store response has no secure_url");
            Error::UploadFailure("media store response has no secure_url".to_string())
        })?;

        tracing::info!(file = %file.file_name, url = %secure_url, "Media uploaded");

        Ok(UploadedMedia { secure_url })
    }
}

/// Cloudinary request signature: the sorted `key=value` pairs joined with `&`,
/// followed by the API secret, hashed with SHA-1.
/// Content type to forward for a file part. Malformed client values are
/// dropped and the media store detects the type itself.
fn part_mime(content_type: Option<&str>) -> Option<mime::Mime> {
    let content_type = content_type?;
    match content_type.parse::<mime::Mime>() {
        Ok(mime) => Some(mime),
        Err(err) => {
            tracing::warn!(%content_type, "Ignoring malformed content type: {}", err);
            None
        }
    }
}

fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Rejects files whose content does not sniff as a known image format.
pub fn ensure_image(file: &UploadFile) -> Result<()> {
    image::guess_format(&file.bytes)
        .map(|_| ())
        .map_err(|_| Error::BadRequest(format!("{} is not a supported image", file.file_name)))
}
