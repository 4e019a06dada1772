use crate::{Error, ErrorContext, Result};
use serde::Serialize;

/// A single query addressed to a deployed project.
///
/// Construction validates every field, so a request that exists is always
/// sendable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    query: String,
    project_name: String,
    deployment_name: String,
}

impl AnalysisRequest {
    pub fn new(
        query: impl Into<String>,
        project_name: impl Into<String>,
        deployment_name: impl Into<String>,
    ) -> Result<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(Error::validation_with_context(
                "query must not be empty",
                ErrorContext::new()
                    .with_field_path("request.query")
                    .with_source("request"),
            ));
        }

        let project_name = required_identifier(project_name.into(), "request.project_name")?;
        let deployment_name =
            required_identifier(deployment_name.into(), "request.deployment_name")?;

        Ok(Self {
            query,
            project_name,
            deployment_name,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn deployment_name(&self) -> &str {
        &self.deployment_name
    }

    pub(crate) fn body(&self) -> RequestBody<'_> {
        RequestBody { query: &self.query }
    }
}

fn required_identifier(value: String, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::configuration_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source("request"),
        ));
    }
    Ok(trimmed.to_string())
}

/// JSON body sent to the service. Identifiers travel in the query string.
#[derive(Debug, Serialize)]
pub(crate) struct RequestBody<'a> {
    pub query: &'a str,
}
