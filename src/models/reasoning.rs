use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasoningMode {
    #[default]
    SinglePath,
    MultiPath,
    AdvanceSteps,
    EnhancedSystemPrompt,
}

impl ReasoningMode {
    pub const ALL: [ReasoningMode; 4] = [
        ReasoningMode::SinglePath,
        ReasoningMode::MultiPath,
        ReasoningMode::AdvanceSteps,
        ReasoningMode::EnhancedSystemPrompt,
    ];

    /// Label embedded in prompts and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            ReasoningMode::SinglePath => "Single-path",
            ReasoningMode::MultiPath => "Multi-path",
            ReasoningMode::AdvanceSteps => "Advance Steps",
            ReasoningMode::EnhancedSystemPrompt => "Enhanced System Prompt",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReasoningMode::SinglePath => "single-path",
            ReasoningMode::MultiPath => "multi-path",
            ReasoningMode::AdvanceSteps => "advance-steps",
            ReasoningMode::EnhancedSystemPrompt => "enhanced-system-prompt",
        }
    }
}

impl std::fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ReasoningMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.slug() == needle.to_lowercase() || m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownOption {
                kind: "reasoning mode",
                value: needle.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    #[default]
    ResearchAndInformationRetrieval,
    CodeDebugging,
    ContentGeneration,
    StrategicPlanning,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::ResearchAndInformationRetrieval,
        TaskType::CodeDebugging,
        TaskType::ContentGeneration,
        TaskType::StrategicPlanning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskType::ResearchAndInformationRetrieval => "Research and Information Retrieval",
            TaskType::CodeDebugging => "Code Debugging",
            TaskType::ContentGeneration => "Content Generation",
            TaskType::StrategicPlanning => "Strategic Planning",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            TaskType::ResearchAndInformationRetrieval => "research",
            TaskType::CodeDebugging => "code-debugging",
            TaskType::ContentGeneration => "content-generation",
            TaskType::StrategicPlanning => "strategic-planning",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == needle.to_lowercase() || t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownOption {
                kind: "task type",
                value: needle.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_by_slug_and_label() {
        assert_eq!("advance-steps".parse::<ReasoningMode>().unwrap(), ReasoningMode::AdvanceSteps);
        assert_eq!(
            "Enhanced System Prompt".parse::<ReasoningMode>().unwrap(),
            ReasoningMode::EnhancedSystemPrompt
        );
        assert_eq!("multi-path".parse::<ReasoningMode>().unwrap(), ReasoningMode::MultiPath);
        assert!("tree-of-thought".parse::<ReasoningMode>().is_err());
    }

    #[test]
    fn test_parse_task() {
        assert_eq!("Code Debugging".parse::<TaskType>().unwrap(), TaskType::CodeDebugging);
        assert_eq!("strategic-planning".parse::<TaskType>().unwrap(), TaskType::StrategicPlanning);
        assert!(matches!(
            "cooking".parse::<TaskType>(),
            Err(Error::UnknownOption { kind: "task type", .. })
        ));
    }
}
