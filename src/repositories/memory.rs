//! In-memory repositories and a recording media store for unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    models::{
        blog::{BlogPost, Category, NewBlogPost, Reaction},
        certificate::{Certificate, CertificateChanges, NewCertificate},
        logo::Logo,
        media::{UploadFile, UploadedMedia},
        users::{NewUser, User},
    },
    services::media::MediaStore,
    Error, Result,
};

use super::{
    blog_repo::BlogRepository, certificates_repo::CertificatesRepository,
    logo_repo::LogoRepository, user_repo::UserRepository,
};

#[derive(Default)]
pub struct MemoryRepo {
    certificates: Mutex<Vec<Certificate>>,
    posts: Mutex<Vec<BlogPost>>,
    categories: Mutex<Vec<Category>>,
    logo: Mutex<Option<Logo>>,
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryRepo {
    pub fn insert_post(&self, title: &str) -> BlogPost {
        let post = BlogPost {
            id: Uuid::now_v7(),
            title: title.to_string(),
            content: "<p>content</p>".to_string(),
            image: None,
            video: None,
            likes: 0,
            dislikes: 0,
            categories: Vec::new(),
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.lock().unwrap().len()
    }
}

#[async_trait]
impl CertificatesRepository for MemoryRepo {
    async fn get_certificates(&self) -> Result<Vec<Certificate>> {
        Ok(self.certificates.lock().unwrap().clone())
    }

    async fn get_certificate(&self, certificate_id: Uuid) -> Result<Option<Certificate>> {
        let certificates = self.certificates.lock().unwrap();
        Ok(certificates.iter().find(|c| c.id == certificate_id).cloned())
    }

    async fn create_certificate(
        &self,
        certificate_id: Uuid,
        certificate: NewCertificate,
    ) -> Result<Certificate> {
        let certificate = Certificate {
            id: certificate_id,
            name: certificate.name,
            description: certificate.description,
            organization: certificate.organization,
            session: certificate.session,
            issued_date: certificate.issued_date,
            image: Some(certificate.image),
            created_at: Utc::now(),
        };
        self.certificates.lock().unwrap().push(certificate.clone());
        Ok(certificate)
    }

    async fn update_certificate(
        &self,
        certificate_id: Uuid,
        changes: CertificateChanges,
    ) -> Result<Option<Certificate>> {
        let mut certificates = self.certificates.lock().unwrap();
        let Some(certificate) = certificates.iter_mut().find(|c| c.id == certificate_id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            certificate.name = name;
        }
        if let Some(description) = changes.description {
            certificate.description = description;
        }
        if let Some(organization) = changes.organization {
            certificate.organization = organization;
        }
        if let Some(start) = changes.session_start {
            certificate.session.start = start;
        }
        if let Some(end) = changes.session_end {
            certificate.session.end = end;
        }
        if changes.clear_issued_date {
            certificate.issued_date = None;
        } else if changes.issued_date.is_some() {
            certificate.issued_date = changes.issued_date;
        }
        if changes.image.is_some() {
            certificate.image = changes.image;
        }

        Ok(Some(certificate.clone()))
    }

    async fn delete_certificate(&self, certificate_id: Uuid) -> Result<bool> {
        let mut certificates = self.certificates.lock().unwrap();
        let before = certificates.len();
        certificates.retain(|c| c.id != certificate_id);
        Ok(certificates.len() < before)
    }
}

#[async_trait]
impl BlogRepository for MemoryRepo {
    async fn get_posts(&self) -> Result<Vec<BlogPost>> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn get_post(&self, post_id: Uuid) -> Result<Option<BlogPost>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn create_post(&self, post_id: Uuid, post: NewBlogPost) -> Result<BlogPost> {
        let known = self.categories.lock().unwrap().clone();
        let categories = post
            .category_ids
            .iter()
            .map(|id| {
                known
                    .iter()
                    .find(|c| c.id == *id)
                    .cloned()
                    .ok_or_else(|| Error::BadRequest(format!("Unknown category: {id}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let post = BlogPost {
            id: post_id,
            title: post.title,
            content: post.content,
            image: post.image,
            video: post.video,
            likes: 0,
            dislikes: 0,
            categories,
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != post_id);
        Ok(posts.len() < before)
    }

    async fn increment_reaction(
        &self,
        post_id: Uuid,
        reaction: Reaction,
    ) -> Result<Option<BlogPost>> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        match reaction {
            Reaction::Like => post.likes += 1,
            Reaction::Dislike => post.dislikes += 1,
        }
        Ok(Some(post.clone()))
    }

    async fn get_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, category_id: Uuid, name: &str) -> Result<Category> {
        let mut categories = self.categories.lock().unwrap();
        if categories.iter().any(|c| c.name == name) {
            return Err(Error::BadRequest("Category already exists".to_string()));
        }
        let category = Category {
            id: category_id,
            name: name.to_string(),
        };
        categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl LogoRepository for MemoryRepo {
    async fn get_logo(&self) -> Result<Option<Logo>> {
        Ok(self.logo.lock().unwrap().clone())
    }

    async fn set_logo(&self, url: &str) -> Result<Logo> {
        let logo = Logo {
            url: url.to_string(),
            updated_at: Utc::now(),
        };
        *self.logo.lock().unwrap() = Some(logo.clone());
        Ok(logo)
    }
}

#[async_trait]
impl UserRepository for MemoryRepo {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_admin(&self) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .filter(|u| u.role == crate::models::users::UserRole::Admin)
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn create_user(&self, user_id: Uuid, user: NewUser) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: user_id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            title: user.title,
            bio: user.bio,
            phone_no: user.phone_no,
            address: user.address,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(user_id, user.clone());
        Ok(user)
    }
}

/// Media store that hands out a fresh URL per call and records what it received.
#[derive(Default)]
pub struct FakeMediaStore {
    uploads: AtomicUsize,
    received: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeMediaStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, file: UploadFile) -> Result<UploadedMedia> {
        if self.fail {
            return Err(Error::UploadFailure("remote store unavailable".to_string()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        self.received.lock().unwrap().push(file.file_name.clone());
        Ok(UploadedMedia {
            secure_url: format!("https://media.test/upload/{n}/{}", file.file_name),
        })
    }
}
