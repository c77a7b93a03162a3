use serde::{Deserialize, Serialize};

use super::reasoning::ReasoningMode;

/// Output of one pipeline run, tagged with the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub mode: ReasoningMode,
    pub artifacts: Artifacts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifacts {
    Report {
        summary: String,
        details: String,
    },
    Steps(StepArtifacts),
    Response {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepArtifacts {
    pub improved_prompt: String,
    pub generated_response: String,
    pub review_feedback: String,
    pub analysis_summary: String,
}

impl StepArtifacts {
    /// Combined view stored as a conversation's details.
    pub fn details(&self) -> String {
        format!(
            "Improved Prompt:\n{}\n\nGenerated Response:\n{}\n\nReview Feedback:\n{}",
            self.improved_prompt, self.generated_response, self.review_feedback
        )
    }
}

impl PipelineResult {
    pub fn new(mode: ReasoningMode, artifacts: Artifacts) -> Self {
        Self { mode, artifacts }
    }

    pub fn summary(&self) -> &str {
        match &self.artifacts {
            Artifacts::Report { summary, .. } => summary,
            Artifacts::Steps(steps) => &steps.analysis_summary,
            Artifacts::Response { text } => text,
        }
    }

    pub fn details(&self) -> String {
        match &self.artifacts {
            Artifacts::Report { details, .. } => details.clone(),
            Artifacts::Steps(steps) => steps.details(),
            Artifacts::Response { text } => text.clone(),
        }
    }
}
