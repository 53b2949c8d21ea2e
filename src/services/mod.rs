use uuid::Uuid;

use crate::{Error, Result};

pub mod auth;
pub mod blog;
pub mod certificates;
pub mod logo;
pub mod media;
pub mod user;

/// Ids that are not valid UUIDs cannot resolve to a record.
pub fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::NotFound)
}
