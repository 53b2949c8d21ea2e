use axum::body::Bytes;

/// A file received in a multipart request, held in memory until it is
/// handed to the media store.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    pub secure_url: String,
}
