//! 标准错误码：将 HTTP 状态码与服务端错误码归一化为统一的错误类别。
//!
//! Standard error codes for conversation analysis failures.
//!
//! The service reports failures through an HTTP status plus an optional
//! `{"error": {"code": ..., "innererror": {"code": ...}}}` body. Both are
//! folded into a [`StandardErrorCode`], which the client then maps onto the
//! [`Error`](crate::Error) taxonomy.
//!
//! | Category    | Codes                                              |
//! |-------------|----------------------------------------------------|
//! | client      | invalid_request, authentication, permission_denied, not_found, request_too_large |
//! | rate        | rate_limited, quota_exhausted                      |
//! | server      | server_error, overloaded, timeout                  |
//! | unknown     | unknown                                            |
//!
//! ## Example
//!
//! ```rust
//! use conversation_analysis::error_code::StandardErrorCode;
//!
//! let code = StandardErrorCode::from_service_code("DeploymentNotFound").unwrap();
//! assert_eq!(code, StandardErrorCode::NotFound);
//! assert!(!code.retryable());
//! assert_eq!(code.category(), "client");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardErrorCode {
    /// Malformed request, invalid parameters, or missing required fields
    InvalidRequest,
    /// Invalid, expired, or missing subscription key
    Authentication,
    /// Valid key but the resource does not allow the call
    PermissionDenied,
    /// Project or deployment does not exist
    NotFound,
    /// Query exceeds the payload limit
    RequestTooLarge,
    /// Request rate limit exceeded
    RateLimited,
    /// Resource quota reached
    QuotaExhausted,
    /// Internal server error on the service side
    ServerError,
    /// Service temporarily unavailable
    Overloaded,
    /// Request timed out before a response was received
    Timeout,
    /// Error could not be classified
    Unknown,
}

impl StandardErrorCode {
    /// Returns the standard name (e.g., `"invalid_request"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Returns whether a caller-side retry may succeed.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Overloaded | Self::Timeout
        )
    }

    /// Returns the category: `"client"`, `"rate"`, `"server"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound
            | Self::RequestTooLarge => "client",
            Self::RateLimited | Self::QuotaExhausted => "rate",
            Self::ServerError | Self::Overloaded | Self::Timeout => "server",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a service error code string to the corresponding `StandardErrorCode`.
    ///
    /// Accepts the service's PascalCase codes (`"ProjectNotFound"`), the
    /// gateway's numeric codes (`"401"`), and the standard snake_case names.
    pub fn from_service_code(service_code: &str) -> Option<Self> {
        let code = match service_code {
            "InvalidRequest" | "InvalidArgument" | "InvalidRequestBodyFormat"
            | "InvalidParameterValue" | "invalid_request" => Self::InvalidRequest,
            "Unauthorized" | "AuthenticationFailed" | "401" | "authentication" => {
                Self::Authentication
            }
            "Forbidden" | "403" | "permission_denied" => Self::PermissionDenied,
            "NotFound" | "ProjectNotFound" | "DeploymentNotFound" | "404" | "not_found" => {
                Self::NotFound
            }
            "RequestTooLarge" | "request_too_large" => Self::RequestTooLarge,
            "TooManyRequests" | "429" | "rate_limited" => Self::RateLimited,
            "QuotaExceeded" | "quota_exhausted" => Self::QuotaExhausted,
            "InternalServerError" | "server_error" => Self::ServerError,
            "ServiceUnavailable" | "overloaded" => Self::Overloaded,
            "Timeout" | "timeout" => Self::Timeout,
            _ => return None,
        };
        Some(code)
    }

    /// Maps an HTTP status code to the most likely `StandardErrorCode`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited,
            503 => Self::Overloaded,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StandardErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
