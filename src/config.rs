//! 配置模块：从环境变量加载并校验客户端配置。
//!
//! Client configuration.
//!
//! Everything the client needs is collected into [`ClientConfig`] up front
//! and validated once. Missing required values fail here, before any
//! connection is opened.

use crate::credential::KeyCredential;
use crate::{Error, ErrorContext, Result};
use std::time::Duration;
use url::Url;

pub const ENDPOINT_ENV: &str = "AZURE_CONVERSATIONS_ENDPOINT";
pub const KEY_ENV: &str = "AZURE_CONVERSATIONS_KEY";
pub const PROJECT_ENV: &str = "AZURE_CONVERSATIONS_WORKFLOW_PROJECT";
pub const DEPLOYMENT_ENV: &str = "AZURE_CONVERSATIONS_DEPLOYMENT";
pub const API_VERSION_ENV: &str = "AZURE_CONVERSATIONS_API_VERSION";
pub const TIMEOUT_ENV: &str = "AZURE_CONVERSATIONS_TIMEOUT_SECS";
pub const PROXY_ENV: &str = "AZURE_CONVERSATIONS_PROXY_URL";

pub const DEFAULT_DEPLOYMENT: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2021-11-01-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub credential: KeyCredential,
    pub project_name: String,
    pub deployment_name: String,
    pub api_version: String,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

impl ClientConfig {
    /// Build a config from explicit values, using defaults for the optional ones.
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self> {
        let project_name = project_name.into();
        if project_name.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "project name must not be empty",
                ErrorContext::new()
                    .with_field_path("project_name")
                    .with_source("config"),
            ));
        }
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            credential: KeyCredential::new(api_key)?,
            project_name,
            deployment_name: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_url: None,
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// All missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoint = value(ENDPOINT_ENV);
        let key = value(KEY_ENV);
        let project = value(PROJECT_ENV);

        let missing: Vec<&str> = [
            (ENDPOINT_ENV, endpoint.is_none()),
            (KEY_ENV, key.is_none()),
            (PROJECT_ENV, project.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(endpoint), Some(key), Some(project)) = (endpoint, key, project) else {
            return Err(Error::configuration_with_context(
                format!("missing required environment variable(s): {}", missing.join(", ")),
                ErrorContext::new()
                    .with_field_path(missing.join(","))
                    .with_source("config"),
            ));
        };

        let mut config = Self::new(&endpoint, key, project)?;

        if let Some(deployment) = value(DEPLOYMENT_ENV) {
            config.deployment_name = deployment;
        }
        if let Some(version) = value(API_VERSION_ENV) {
            config.api_version = version;
        }
        if let Some(secs) = value(TIMEOUT_ENV)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }
        config.proxy_url = value(PROXY_ENV);

        Ok(config)
    }

    pub fn with_deployment(mut self, deployment_name: impl Into<String>) -> Self {
        self.deployment_name = deployment_name.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse the resource endpoint and normalize it to end with `/`.
pub(crate) fn parse_endpoint(raw: &str) -> Result<Url> {
    let context = || {
        ErrorContext::new()
            .with_field_path("endpoint")
            .with_source("config")
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| {
        Error::configuration_with_context(format!("invalid endpoint URL: {}", e), context())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("endpoint must use http or https, got '{}'", url.scheme()),
            context(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}
