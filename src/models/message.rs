use serde::{Deserialize, Serialize};

use super::catalog::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One call to the completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: ModelId,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: ModelId, messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            model,
            messages,
            max_tokens,
        }
    }

    pub fn estimate_tokens(&self) -> usize {
        let char_count: usize = self.messages.iter().map(|m| m.content.len()).sum();
        // Rough estimate: ~4 characters per token
        char_count / 4
    }
}
