use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{
        certificate::{
            check_session, parse_optional_date, require_date, Certificate, CertificateChanges,
            CreateCertificateDto, NewCertificate, Session, UpdateCertificateDto,
        },
        media::UploadFile,
    },
    repositories::certificates_repo::CertificatesRepository,
    services::{
        media::{ensure_image, MediaStore},
        parse_id,
    },
    Error, Result,
};

#[derive(Clone)]
pub struct CertificatesService {
    repo: Arc<dyn CertificatesRepository>,
    media: Arc<dyn MediaStore>,
}

impl CertificatesService {
    pub fn new(repo: Arc<dyn CertificatesRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { repo, media }
    }

    pub async fn get_certificates(&self) -> Result<Vec<Certificate>> {
        self.repo.get_certificates().await
    }

    pub async fn get_certificate(&self, certificate_id: &str) -> Result<Certificate> {
        let certificate_id = parse_id(certificate_id)?;

        self.repo
            .get_certificate(certificate_id)
            .await?
            .ok_or(Error::NotFound)
    }

    /// Validates the form, uploads the image and stores the certificate.
    /// Nothing is persisted when the upload fails.
    pub async fn create_certificate(
        &self,
        certificate: CreateCertificateDto,
        image: Option<UploadFile>,
    ) -> Result<Certificate> {
        certificate.validate()?;

        let start = require_date("startDate", certificate.start_date.as_deref())?;
        let end = require_date("endDate", certificate.end_date.as_deref())?;
        check_session(start, end)?;
        let issued_date = parse_optional_date("issuedDate", certificate.issued_date.as_deref())?;

        let image = image.ok_or_else(|| Error::BadRequest("Image file is required".to_string()))?;
        ensure_image(&image)?;

        let uploaded = self.media.upload(image).await?;

        let certificate = self
            .repo
            .create_certificate(
                Uuid::now_v7(),
                NewCertificate {
                    name: certificate.name,
                    description: certificate.description,
                    organization: certificate.organization,
                    session: Session { start, end },
                    issued_date,
                    image: uploaded.secure_url,
                },
            )
            .await?;

        tracing::info!(certificate_id = %certificate.id, "Certificate created");

        Ok(certificate)
    }

    pub async fn update_certificate(
        &self,
        certificate_id: &str,
        changes: UpdateCertificateDto,
        image: Option<UploadFile>,
    ) -> Result<Certificate> {
        let certificate_id = parse_id(certificate_id)?;

        let current = self
            .repo
            .get_certificate(certificate_id)
            .await?
            .ok_or(Error::NotFound)?;

        changes.validate()?;

        let session_start = parse_optional_date("startDate", changes.start_date.as_deref())?;
        let session_end = parse_optional_date("endDate", changes.end_date.as_deref())?;
        let issued_date = parse_optional_date("issuedDate", changes.issued_date.as_deref())?;
        let clear_issued_date = changes
            .issued_date
            .as_deref()
            .is_some_and(|value| value.trim().is_empty());

        check_session(
            session_start.unwrap_or(current.session.start),
            session_end.unwrap_or(current.session.end),
        )?;

        let image = match image {
            Some(file) => {
                ensure_image(&file)?;
                Some(self.media.upload(file).await?.secure_url)
            }
            None => changes.image.filter(|url| !url.trim().is_empty()),
        };

        let certificate = self
            .repo
            .update_certificate(
                certificate_id,
                CertificateChanges {
                    name: changes.name,
                    description: changes.description,
                    organization: changes.organization,
                    session_start,
                    session_end,
                    issued_date,
                    clear_issued_date,
                    image,
                },
            )
            .await?
            .ok_or(Error::NotFound)?;

        tracing::info!(certificate_id = %certificate.id, "Certificate updated");

        Ok(certificate)
    }

    pub async fn delete_certificate(&self, certificate_id: &str) -> Result<()> {
        let certificate_id = parse_id(certificate_id)?;

        if !self.repo.delete_certificate(certificate_id).await? {
            return Err(Error::NotFound);
        }

        tracing::info!(%certificate_id, "Certificate deleted");

        Ok(())
    }
}
