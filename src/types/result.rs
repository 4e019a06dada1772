//! Prediction types returned by the service.

use crate::{Error, ErrorContext, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// The service's answer to one [`AnalysisRequest`](crate::AnalysisRequest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Query as echoed by the service.
    pub query: String,
    pub prediction: Prediction,
}

impl AnalysisResult {
    /// The top intent with its score and nested result.
    ///
    /// After the client has accepted a response this is always `intents[0]`.
    pub fn top_intent(&self) -> Option<&TargetIntentResult> {
        self.prediction.top_intent_result()
    }

    /// Check the echo and enforce the prediction invariants.
    pub(crate) fn normalize(mut self, submitted_query: &str) -> Result<Self> {
        if self.query != submitted_query {
            return Err(invalid(
                "echoed query does not match the submitted query",
                "query",
            ));
        }
        self.prediction.normalize()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub project_kind: ProjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_intent: Option<String>,
    /// Ranked intents. Accepts either a JSON array or an object keyed by intent
    /// name; object keys are read in document order.
    #[serde(default, deserialize_with = "deserialize_intents")]
    pub intents: Vec<TargetIntentResult>,
}

impl Prediction {
    /// Rank intents and make `intents[0]` the top intent.
    ///
    /// Intents are ordered by descending confidence (ties keep service order).
    /// When `top_intent` is set, the intent with that name is then moved to the
    /// front; when it is unset, it takes the name of the highest scored intent.
    /// Fails if the named intent is absent, an intent has no name, or a score is
    /// outside `[0, 1]`.
    pub fn normalize(&mut self) -> Result<()> {
        for (i, intent) in self.intents.iter().enumerate() {
            if intent.name.trim().is_empty() {
                return Err(invalid(
                    format!("intent at position {} has no name", i),
                    format!("prediction.intents[{}].name", i),
                ));
            }
            let score = intent.confidence_score;
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(invalid(
                    format!(
                        "confidence score {} for intent '{}' is outside [0, 1]",
                        score, intent.name
                    ),
                    format!("prediction.intents[{}].confidenceScore", i),
                ));
            }
        }

        self.intents
            .sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));

        if self
            .top_intent
            .as_deref()
            .map_or(false, |t| t.trim().is_empty())
        {
            self.top_intent = None;
        }

        if self.top_intent.is_none() {
            if let Some(first) = self.intents.first() {
                debug!(
                    top_intent = first.name.as_str(),
                    "no top intent reported; using the highest scored intent"
                );
                self.top_intent = Some(first.name.clone());
            }
        }

        if let Some(top) = &self.top_intent {
            let pos = self
                .intents
                .iter()
                .position(|i| &i.name == top)
                .ok_or_else(|| {
                    invalid(
                        format!("top intent '{}' is missing from the intent list", top),
                        "prediction.topIntent",
                    )
                })?;
            if pos != 0 {
                debug!(
                    top_intent = top.as_str(),
                    position = pos,
                    "top intent is not the highest scored; moving it first"
                );
                let intent = self.intents.remove(pos);
                self.intents.insert(0, intent);
            }
        }
        Ok(())
    }

    pub fn top_intent_result(&self) -> Option<&TargetIntentResult> {
        self.top_intent.as_ref().and_then(|_| self.intents.first())
    }
}

/// One intent of the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetIntentResult {
    #[serde(default, alias = "category")]
    pub name: String,
    pub confidence_score: f64,
    /// Engine the orchestrator routed to (`luis`, `conversation`, `question_answering`, ...).
    #[serde(default, alias = "targetType", skip_serializing_if = "Option::is_none")]
    pub target_kind: Option<String>,
    /// Opaque response of the downstream engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Kind of project that produced a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectKind {
    Conversation,
    /// Also reported as `workflow` by older service versions.
    Orchestration,
    Other(String),
}

impl From<String> for ProjectKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "conversation" => ProjectKind::Conversation,
            "orchestration" | "workflow" => ProjectKind::Orchestration,
            _ => ProjectKind::Other(raw),
        }
    }
}

impl From<ProjectKind> for String {
    fn from(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Conversation => "Conversation".to_string(),
            ProjectKind::Orchestration => "Orchestration".to_string(),
            ProjectKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Conversation => f.write_str("Conversation"),
            ProjectKind::Orchestration => f.write_str("Orchestration"),
            ProjectKind::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntentsWire {
    List(Vec<TargetIntentResult>),
    Map(Map<String, Value>),
}

fn deserialize_intents<'de, D>(deserializer: D) -> std::result::Result<Vec<TargetIntentResult>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntentsWire>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(IntentsWire::List(intents)) => Ok(intents),
        Some(IntentsWire::Map(map)) => map
            .into_iter()
            .map(|(name, value)| {
                let mut intent: TargetIntentResult =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                if intent.name.is_empty() {
                    intent.name = name;
                }
                Ok(intent)
            })
            .collect(),
    }
}

fn invalid(message: impl Into<String>, field: impl Into<String>) -> Error {
    Error::invalid_response_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_source("response"),
    )
}
