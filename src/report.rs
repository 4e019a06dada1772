//! Human-readable rendering of an [`AnalysisResult`].

use crate::types::AnalysisResult;
use std::fmt;

/// Labeled lines describing a result: query, project kind, top intent with
/// its confidence, and the downstream engine's response for the top intent.
pub struct Report<'a> {
    result: &'a AnalysisResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prediction = &self.result.prediction;
        writeln!(f, "query: {}", self.result.query)?;
        writeln!(f, "project kind: {}", prediction.project_kind)?;
        writeln!(f)?;

        writeln!(f, "view top intent:")?;
        let Some(top) = self.result.top_intent() else {
            return writeln!(f, "\ttop intent: (none)");
        };
        writeln!(f, "\ttop intent: {}", top.name)?;
        writeln!(f, "\tconfidence score: {}", top.confidence_score)?;
        writeln!(f)?;

        let kind = top.target_kind.as_deref().unwrap_or("target");
        writeln!(f, "view {} response:", kind)?;
        match &top.result {
            Some(value) => writeln!(f, "\t{} response: {}", kind, value),
            None => writeln!(f, "\t{} response: (none)", kind),
        }
    }
}
