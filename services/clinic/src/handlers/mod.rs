use serde::Serialize;
use uuid::Uuid;

use crate::error::ClinicServiceError;

pub mod auth;
pub mod doctor;
pub mod mapping;
pub mod patient;

/// Parse a path id; anything that is not a UUID names no record.
pub(crate) fn parse_id(raw: &str, not_found: ClinicServiceError) -> Result<Uuid, ClinicServiceError> {
    raw.parse().map_err(|_| not_found)
}

/// Body for successful deletes.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
