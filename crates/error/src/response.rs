//! # Wire Error Envelope
//!
//! The JSON body returned on every business failure:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "NOT_FOUND",
//!     "message": "resource not found"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::AppError;

/// The inner error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code from the closed taxonomy.
    pub code:    String,
    /// Human-readable message.
    pub message: String,
}

/// The outer envelope carrying an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Build an envelope from a code and message.
    #[inline]
    pub fn new(code: impl ToString, message: impl ToString) -> Self {
        Self {
            error: ErrorBody {
                code:    code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

impl From<&AppError> for ErrorEnvelope {
    fn from(err: &AppError) -> Self { Self::new(err.code(), err.message()) }
}
