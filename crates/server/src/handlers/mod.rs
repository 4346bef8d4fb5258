//! HTTP request handlers, one module per resource.

pub mod pull_requests;
pub mod stats;
pub mod teams;
pub mod users;

use error::AppError;
use validator::Validate;

/// Validate a request body, mapping failures to the transport-level 400.
pub(crate) fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}
