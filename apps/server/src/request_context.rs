//! Per-request tenant context
//!
//! Every internal API call is made on behalf of exactly one company. The
//! tenant is carried explicitly as a header (set by the API gateway after
//! session resolution) and threaded as a plain parameter through services
//! and repositories, keeping data access free of ambient session state.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::Error;

pub const COMPANY_HEADER: &str = "x-company-id";
pub const USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub company_id: Uuid,
    pub user_id: Option<Uuid>,
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Option<Uuid>, Error> {
    let Some(value) = parts.headers.get(name) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| Error::Validation(format!("{name} header is not valid UTF-8")))?;

    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| Error::Validation(format!("{name} header is not a valid UUID")))
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let company_id = header_uuid(parts, COMPANY_HEADER)?
            .ok_or_else(|| Error::Validation(format!("{COMPANY_HEADER} header is required")))?;
        let user_id = header_uuid(parts, USER_HEADER)?;

        Ok(Self {
            company_id,
            user_id,
        })
    }
}
