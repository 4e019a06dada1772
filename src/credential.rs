//! Subscription key credential.

use crate::{Error, ErrorContext, Result};
use reqwest::header::HeaderValue;
use std::fmt;

/// Header the service reads the subscription key from.
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

const REDACTED: &str = "[REDACTED]";

/// Shortest key that [`KeyCredential::redact`] scrubs from messages.
const MIN_REDACT_LEN: usize = 8;

/// API key for the conversation analysis resource.
///
/// The secret never appears in `Debug` output, and service messages that
/// echo it back are scrubbed before they reach an [`Error`].
#[derive(Clone, PartialEq, Eq)]
pub struct KeyCredential {
    key: String,
}

impl KeyCredential {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(Error::configuration_with_context(
                "API key must not be empty",
                ErrorContext::new()
                    .with_field_path("credential.key")
                    .with_source("credential"),
            ));
        }
        Ok(Self { key })
    }

    pub(crate) fn secret(&self) -> &str {
        &self.key
    }

    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.key).map_err(|_| {
            Error::configuration_with_context(
                "API key contains characters not allowed in an HTTP header",
                ErrorContext::new().with_field_path("credential.key"),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Replace every occurrence of the secret in `text`.
    ///
    /// Keys shorter than `MIN_REDACT_LEN` characters are not scrubbed.
    pub(crate) fn redact(&self, text: &str) -> String {
        if self.key.chars().count() < MIN_REDACT_LEN {
            return text.to_string();
        }
        text.replace(&self.key, REDACTED)
    }
}

impl fmt::Debug for KeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCredential")
            .field("key", &REDACTED)
            .finish()
    }
}
