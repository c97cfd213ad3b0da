//! HTTP request handlers

pub mod health;
pub mod integrated_vendors;
pub mod places;
pub mod vendors;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{Error, Result};

/// Body of every bulk-delete endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

/// Run declared field rules, surfacing failures before any business logic.
pub(crate) fn validated<T: Validate>(input: T) -> Result<T> {
    input
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(input)
}
