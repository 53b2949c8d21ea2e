use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    models::certificate::{Certificate, CertificateChanges, NewCertificate},
    Result,
};

use super::PostgresRepo;

const CERTIFICATE_COLUMNS: &str = r#"
    id, name, description, organization, session_start, session_end, issued_date, image, created_at
"#;

#[async_trait]
pub trait CertificatesRepository: Send + Sync {
    async fn get_certificates(&self) -> Result<Vec<Certificate>>;
    async fn get_certificate(&self, certificate_id: Uuid) -> Result<Option<Certificate>>;
    async fn create_certificate(
        &self,
        certificate_id: Uuid,
        certificate: NewCertificate,
    ) -> Result<Certificate>;
    async fn update_certificate(
        &self,
        certificate_id: Uuid,
        changes: CertificateChanges,
    ) -> Result<Option<Certificate>>;
    async fn delete_certificate(&self, certificate_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl CertificatesRepository for PostgresRepo {
    async fn get_certificates(&self) -> Result<Vec<Certificate>> {
        let sql = format!("SELECT {CERTIFICATE_COLUMNS} FROM certificates ORDER BY id");

        let certificates = sqlx::query_as::<_, Certificate>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(certificates)
    }

    async fn get_certificate(&self, certificate_id: Uuid) -> Result<Option<Certificate>> {
        tracing::debug!("Fetching certificate by ID: {}", certificate_id);

        let sql = format!("SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE id = $1");

        let certificate = sqlx::query_as::<_, Certificate>(&sql)
            .bind(certificate_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(certificate)
    }

    async fn create_certificate(
        &self,
        certificate_id: Uuid,
        certificate: NewCertificate,
    ) -> Result<Certificate> {
        let sql = format!(
            r#"
            INSERT INTO certificates
                (id, name, description, organization, session_start, session_end, issued_date, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CERTIFICATE_COLUMNS}
            "#
        );

        let certificate = sqlx::query_as::<_, Certificate>(&sql)
            .bind(certificate_id)
            .bind(certificate.name)
            .bind(certificate.description)
            .bind(certificate.organization)
            .bind(certificate.session.start)
            .bind(certificate.session.end)
            .bind(certificate.issued_date)
            .bind(certificate.image)
            .fetch_one(&self.pool)
            .await?;

        Ok(certificate)
    }

    async fn update_certificate(
        &self,
        certificate_id: Uuid,
        changes: CertificateChanges,
    ) -> Result<Option<Certificate>> {
        let sql = format!(
            r#"
            UPDATE certificates
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                organization = COALESCE($4, organization),
                session_start = COALESCE($5, session_start),
                session_end = COALESCE($6, session_end),
                issued_date = CASE WHEN $9 THEN NULL ELSE COALESCE($7, issued_date) END,
                image = COALESCE($8, image)
            WHERE id = $1
            RETURNING {CERTIFICATE_COLUMNS}
            "#
        );

        let certificate = sqlx::query_as::<_, Certificate>(&sql)
            .bind(certificate_id)
            .bind(changes.name)
            .bind(changes.description)
            .bind(changes.organization)
            .bind(changes.session_start)
            .bind(changes.session_end)
            .bind(changes.issued_date)
            .bind(changes.image)
            .bind(changes.clear_issued_date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(certificate)
    }

    async fn delete_certificate(&self, certificate_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(certificate_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
