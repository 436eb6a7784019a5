//! Response envelope types for API endpoints.

use serde::{Deserialize, Serialize};

/// Standard API error response body.
///
/// Every failed request serializes to `{ "success": false, "error": CODE,
/// "message": … }`, the mirror of the `{ "success": true, "data": … }`
/// success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false` for errors.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}
