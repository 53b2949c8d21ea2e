use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{Error, Result};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Session {
    #[sqlx(rename = "session_start")]
    pub start: DateTime<Utc>,
    #[sqlx(rename = "session_end")]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Certificate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub organization: String,
    #[sqlx(flatten)]
    pub session: Session,
    #[serde(rename = "issuedDate")]
    pub issued_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Text fields of the certificate create form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCertificateDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "issuedDate")]
    pub issued_date: Option<String>,
}

/// Text fields of the certificate update form. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCertificateDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "issuedDate")]
    pub issued_date: Option<String>,
    /// Existing image URL sent back by the dashboard when no new file is attached.
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub name: String,
    pub description: String,
    pub organization: String,
    pub session: Session,
    pub issued_date: Option<DateTime<Utc>>,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct CertificateChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub session_start: Option<DateTime<Utc>>,
    pub session_end: Option<DateTime<Utc>>,
    pub issued_date: Option<DateTime<Utc>>,
    /// Set when the form sent a blank `issuedDate`; the stored date is removed.
    pub clear_issued_date: bool,
    pub image: Option<String>,
}

/// Parses `YYYY-MM-DD` (as midnight UTC) or an RFC 3339 timestamp.
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| Error::BadRequest(format!("{field} is not a valid date")))
}

/// Like [`parse_date`] but treats a missing or blank value as absent.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

pub fn require_date(field: &str, value: Option<&str>) -> Result<DateTime<Utc>> {
    parse_optional_date(field, value)?.ok_or_else(|| Error::BadRequest(format!("{field} is required")))
}

pub fn check_session(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end < start {
        return Err(Error::BadRequest(
            "endDate cannot be earlier than startDate".to_string(),
        ));
    }
    Ok(())
}
