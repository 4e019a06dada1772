use crate::error_code::StandardErrorCode;
use crate::transport::TransportError;
use std::time::Duration;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "AZURE_CONVERSATIONS_KEY", "request.query")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config", "analyze")
    pub source: Option<String>,
    /// HTTP status returned by the service, when there was a response
    pub status_code: Option<u16>,
    /// Client request id sent as `x-ms-client-request-id`
    pub request_id: Option<String>,
    /// Standard classification derived from the status or service error code
    pub standard_code: Option<StandardErrorCode>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_standard_code(mut self, code: StandardErrorCode) -> Self {
        self.standard_code = Some(code);
        self
    }
}

/// Unified error type for conversation analysis.
///
/// Variants follow the caller's decision points: fix local configuration,
/// fix the request, fix credentials or identifiers, or retry later.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Authentication error: {message}{}", format_context(.context))]
    Authentication {
        message: String,
        context: ErrorContext,
    },

    #[error("Not found: {message}{}", format_context(.context))]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    #[error("Transient service error: {message}{}", format_context(.context))]
    TransientService {
        message: String,
        retry_after: Option<Duration>,
        context: ErrorContext,
    },

    #[error("Invalid response: {message}{}", format_context(.context))]
    InvalidResponse {
        message: String,
        context: ErrorContext,
    },

    #[error("Remote error: HTTP {status}: {message}{}", format_context(.context))]
    Remote {
        status: u16,
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if let Some(ref id) = ctx.request_id {
        parts.push(format!("request_id: {}", id));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn authentication_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Authentication {
            message: msg.into(),
            context,
        }
    }

    pub fn not_found_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::NotFound {
            message: msg.into(),
            context,
        }
    }

    pub fn transient_with_context(
        msg: impl Into<String>,
        retry_after: Option<Duration>,
        context: ErrorContext,
    ) -> Self {
        Error::TransientService {
            message: msg.into(),
            retry_after,
            context,
        }
    }

    pub fn invalid_response_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidResponse {
            message: msg.into(),
            context,
        }
    }

    /// Whether a caller-side retry (with backoff) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransientService { .. })
    }

    /// Delay suggested by the service via `Retry-After`, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::TransientService { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => self.context().and_then(|c| c.status_code),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Authentication { context, .. }
            | Error::NotFound { context, .. }
            | Error::TransientService { context, .. }
            | Error::InvalidResponse { context, .. }
            | Error::Remote { context, .. } => Some(context),
        }
    }

    /// Replace the structured context, keeping the variant and message.
    pub fn with_context(mut self, new_context: ErrorContext) -> Self {
        match &mut self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Authentication { context, .. }
            | Error::NotFound { context, .. }
            | Error::TransientService { context, .. }
            | Error::InvalidResponse { context, .. }
            | Error::Remote { context, .. } => *context = new_context,
        }
        self
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        let context = ErrorContext::new().with_source("transport");
        match err {
            TransportError::Timeout(after) => Error::transient_with_context(
                format!("request timed out after {} ms", after.as_millis()),
                None,
                context.with_standard_code(StandardErrorCode::Timeout),
            ),
            TransportError::Builder(msg) => Error::configuration_with_context(
                format!("failed to create HTTP client: {}", msg),
                context,
            ),
            other => Error::transient_with_context(other.to_string(), None, context),
        }
    }
}
