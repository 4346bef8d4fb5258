//! # Error Infrastructure
//!
//! The closed application error taxonomy and its HTTP mapping.
//!
//! Every business failure the service can produce is one of the variants
//! below; anything else is collapsed into `Internal` before it reaches the
//! wire. The JSON envelope for failures is defined in [`response`].

pub mod response;

pub use response::{ErrorBody, ErrorEnvelope};

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("team_name already exists")]
    TeamExists,

    #[error("PR id already exists")]
    PrExists,

    #[error("cannot reassign on merged PR")]
    PrMerged,

    #[error("reviewer is not assigned to this PR")]
    NotAssigned,

    #[error("no active replacement candidate in team")]
    NoCandidate,

    #[error("{message}")]
    NotFound {
        message: String,
    },

    #[error("{message}")]
    Validation {
        message: String,
    },

    #[error("{message}")]
    Internal {
        message: String,
    },
}

impl AppError {
    /// Create a team-name conflict error.
    #[inline]
    #[must_use]
    pub fn team_exists() -> Self { Self::TeamExists }

    /// Create a pull-request-id conflict error.
    #[inline]
    #[must_use]
    pub fn pr_exists() -> Self { Self::PrExists }

    /// Create a merged-PR mutation error.
    #[inline]
    #[must_use]
    pub fn pr_merged() -> Self { Self::PrMerged }

    /// Create a reviewer-not-assigned error.
    #[inline]
    #[must_use]
    pub fn not_assigned() -> Self { Self::NotAssigned }

    /// Create a no-replacement-candidate error.
    #[inline]
    #[must_use]
    pub fn no_candidate() -> Self { Self::NoCandidate }

    /// Create a not found error.
    #[inline]
    pub fn not_found(message: impl ToString) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a request validation error.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    #[must_use]
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::TeamExists => http::StatusCode::BAD_REQUEST,
            AppError::PrExists => http::StatusCode::CONFLICT,
            AppError::PrMerged => http::StatusCode::CONFLICT,
            AppError::NotAssigned => http::StatusCode::CONFLICT,
            AppError::NoCandidate => http::StatusCode::CONFLICT,
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::Validation {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Internal {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the wire error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AppError::TeamExists => "TEAM_EXISTS",
            AppError::PrExists => "PR_EXISTS",
            AppError::PrMerged => "PR_MERGED",
            AppError::NotAssigned => "NOT_ASSIGNED",
            AppError::NoCandidate => "NO_CANDIDATE",
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::Validation {
                ..
            } => "BAD_REQUEST",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
        }
    }

    /// Get the human-readable message.
    #[must_use]
    pub fn message(&self) -> String { self.to_string() }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert AppError to an HTTP response with the wire error envelope.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorEnvelope::from(&self);
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::team_exists().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::pr_exists().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::pr_merged().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::not_assigned().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::no_candidate().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::not_found("resource not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(AppError::team_exists().code(), "TEAM_EXISTS");
        assert_eq!(AppError::pr_exists().code(), "PR_EXISTS");
        assert_eq!(AppError::pr_merged().code(), "PR_MERGED");
        assert_eq!(AppError::not_assigned().code(), "NOT_ASSIGNED");
        assert_eq!(AppError::no_candidate().code(), "NO_CANDIDATE");
        assert_eq!(AppError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(AppError::internal("x").code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(AppError::pr_exists().message(), "PR id already exists");
        assert_eq!(AppError::team_exists().message(), "team_name already exists");
        assert_eq!(AppError::pr_merged().message(), "cannot reassign on merged PR");
        assert_eq!(
            AppError::not_assigned().message(),
            "reviewer is not assigned to this PR"
        );
        assert_eq!(
            AppError::no_candidate().message(),
            "no active replacement candidate in team"
        );
    }

    #[test]
    fn test_not_found_carries_message() {
        let err = AppError::not_found("resource not found");
        assert_eq!(err.message(), "resource not found");
    }
}
