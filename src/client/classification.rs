//! Mapping of failed HTTP responses onto [`Error`].

use crate::credential::KeyCredential;
use crate::error_code::StandardErrorCode;
use crate::transport::HttpReply;
use crate::{Error, ErrorContext};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::time::Duration;

const MAX_RAW_BODY_CHARS: usize = 256;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "innererror")]
    inner_error: Option<Box<ServiceError>>,
}

impl ServiceError {
    /// Innermost code first; the inner code is the more specific one.
    fn codes(&self) -> Vec<&str> {
        let mut codes = self
            .inner_error
            .as_ref()
            .map(|inner| inner.codes())
            .unwrap_or_default();
        if let Some(code) = self.code.as_deref() {
            codes.push(code);
        }
        codes
    }
}

/// Turn a non-2xx reply into the matching error variant.
///
/// Service error codes refine the HTTP status within its family. The
/// returned message is scrubbed of the subscription key.
pub(crate) fn classify_failure(
    reply: &HttpReply,
    credential: &KeyCredential,
    request_id: &str,
) -> Error {
    let envelope = serde_json::from_str::<ErrorEnvelope>(&reply.body).ok();

    let code = envelope
        .as_ref()
        .and_then(|e| {
            e.error
                .codes()
                .into_iter()
                .filter_map(StandardErrorCode::from_service_code)
                .find(|code| same_family(reply.status, *code))
        })
        .unwrap_or_else(|| StandardErrorCode::from_http_status(reply.status));

    let message = envelope
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| raw_message(reply));
    let message = credential.redact(&message);

    let mut context = ErrorContext::new()
        .with_status_code(reply.status)
        .with_request_id(request_id)
        .with_standard_code(code)
        .with_source("analyze");
    if let Some(service_code) = envelope.as_ref().and_then(|e| e.error.code.clone()) {
        context = context.with_details(format!("service_code: {}", service_code));
    }

    match code {
        StandardErrorCode::InvalidRequest | StandardErrorCode::RequestTooLarge => {
            Error::validation_with_context(message, context)
        }
        StandardErrorCode::Authentication | StandardErrorCode::PermissionDenied => {
            Error::authentication_with_context(message, context)
        }
        StandardErrorCode::NotFound => Error::not_found_with_context(message, context),
        c if c.retryable() => {
            Error::transient_with_context(message, retry_after(&reply.headers), context)
        }
        _ if reply.status >= 500 => {
            Error::transient_with_context(message, retry_after(&reply.headers), context)
        }
        _ => Error::Remote {
            status: reply.status,
            message,
            context,
        },
    }
}

/// A service code may only refine the class within the status family: a 5xx
/// stays a server failure whatever the body says, and a 4xx cannot become one.
fn same_family(status: u16, code: StandardErrorCode) -> bool {
    let server_side = code.category() == "server";
    if status >= 500 {
        server_side
    } else {
        !server_side
    }
}

/// Parse `Retry-After: <seconds>`; the HTTP-date form is ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get("retry-after")?.to_str().ok()?;
    let secs: u64 = raw.trim().parse().ok()?;
    Some(Duration::from_secs(secs))
}

fn raw_message(reply: &HttpReply) -> String {
    let body = reply.body.trim();
    if body.is_empty() {
        return format!("HTTP {}", reply.status);
    }
    let mut text: String = body.chars().take(MAX_RAW_BODY_CHARS).collect();
    if body.chars().count() > MAX_RAW_BODY_CHARS {
        text.push_str("...");
    }
    text
}
