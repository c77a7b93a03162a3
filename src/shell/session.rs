use chrono::Local;

use crate::error::{Error, Result};
use crate::extract::extract_text;
use crate::models::{Artifacts, Conversation, ModelId, PipelineResult, ReasoningMode, TaskType};
use crate::pipeline::PipelineRequest;

pub const REPORT_FAILED_SUMMARY: &str = "Failed to generate report.";
pub const REPORT_FAILED_DETAILS: &str = "An error occurred during report generation.";

/// Interactive state threaded through every shell handler.
#[derive(Debug, Clone)]
pub struct Session {
    conversations: Vec<Conversation>,
    active: usize,
    files: Vec<(String, String)>,
    selected_file: Option<String>,
    pub model: ModelId,
    pub mode: ReasoningMode,
    pub task: TaskType,
    last_query: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            conversations: vec![Conversation::new(timestamp_name())],
            active: 0,
            files: Vec::new(),
            selected_file: None,
            model: ModelId::default(),
            mode: ReasoningMode::default(),
            task: TaskType::default(),
            last_query: None,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active(&self) -> &Conversation {
        &self.conversations[self.active]
    }

    fn active_mut(&mut self) -> &mut Conversation {
        &mut self.conversations[self.active]
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.conversations
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::ConversationNotFound(name.to_string()))
    }

    /// Starts a conversation named after the current local time and makes it active.
    pub fn new_conversation(&mut self) -> &Conversation {
        let base = timestamp_name();
        let mut name = base.clone();
        let mut n = 2;
        while self.conversations.iter().any(|c| c.name == name) {
            name = format!("{} ({})", base, n);
            n += 1;
        }

        tracing::info!("Created conversation {}", name);
        self.conversations.push(Conversation::new(name));
        self.active = self.conversations.len() - 1;
        self.active()
    }

    pub fn switch_conversation(&mut self, name: &str) -> Result<()> {
        self.active = self.position(name)?;
        Ok(())
    }

    /// Removes a conversation; the first remaining one becomes active.
    pub fn delete_conversation(&mut self, name: &str) -> Result<()> {
        if self.conversations.len() <= 1 {
            return Err(Error::LastConversation);
        }
        let index = self.position(name)?;
        self.conversations.remove(index);
        self.active = 0;
        tracing::info!("Deleted conversation {}", name);
        Ok(())
    }

    pub fn rename_conversation(&mut self, from: &str, to: &str) -> Result<()> {
        let to = to.trim();
        if to.is_empty() || to == from {
            return Ok(());
        }
        if self.conversations.iter().any(|c| c.name == to) {
            return Err(Error::DuplicateConversation(to.to_string()));
        }
        let index = self.position(from)?;
        self.conversations[index].name = to.to_string();
        self.active = index;
        Ok(())
    }

    pub fn rename_active(&mut self, to: &str) -> Result<()> {
        let from = self.active().name.clone();
        self.rename_conversation(&from, to)
    }

    pub fn delete_active(&mut self) -> Result<()> {
        let name = self.active().name.clone();
        self.delete_conversation(&name)
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.active_mut().system_prompt = prompt.into();
    }

    /// Extracts and stores an uploaded file, then selects it.
    pub fn upload(&mut self, name: &str, bytes: &[u8]) -> Result<&str> {
        let text = extract_text(bytes, name)?;
        tracing::info!("File {} uploaded and processed ({} chars)", name, text.chars().count());
        self.add_file(name, text);
        Ok(self.file_text(name).unwrap_or_default())
    }

    pub fn add_file(&mut self, name: &str, text: String) {
        match self.files.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = text,
            None => self.files.push((name.to_string(), text)),
        }
        self.selected_file = Some(name.to_string());
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(n, _)| n.as_str())
    }

    pub fn file_text(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_str())
    }

    pub fn select_file(&mut self, name: &str) -> Result<()> {
        if self.file_text(name).is_none() {
            return Err(Error::UnknownOption {
                kind: "file",
                value: name.to_string(),
            });
        }
        self.selected_file = Some(name.to_string());
        Ok(())
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    fn selected_context(&self) -> String {
        self.selected_file
            .as_deref()
            .and_then(|name| self.file_text(name))
            .unwrap_or_default()
            .to_string()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    fn request(&self, query: impl Into<String>, context: String) -> PipelineRequest {
        let task = match self.mode {
            ReasoningMode::MultiPath => Some(self.task),
            _ => None,
        };
        PipelineRequest::new(query, self.model.clone(), self.mode)
            .with_system_prompt(self.active().system_prompt.clone())
            .with_context(context)
            .with_task(task)
    }

    /// Request for a typed query, using the selected file as context.
    pub fn query_request(&mut self, query: &str) -> Result<PipelineRequest> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        self.last_query = Some(query.to_string());
        Ok(self.request(query, self.selected_context()))
    }

    /// Request for a report on the selected file.
    ///
    /// Advance-steps and enhanced modes take the file text itself as the query.
    pub fn report_request(&self) -> Result<PipelineRequest> {
        let name = self.selected_file.as_deref().ok_or(Error::NoFileSelected)?;
        let text = self.file_text(name).ok_or(Error::NoFileSelected)?.to_string();

        Ok(match self.mode {
            ReasoningMode::AdvanceSteps | ReasoningMode::EnhancedSystemPrompt => {
                self.request(text, String::new())
            }
            ReasoningMode::SinglePath | ReasoningMode::MultiPath => {
                self.request(crate::llm::prompts::report_query_for_file(name), text)
            }
        })
    }

    pub fn apply_result(&mut self, result: &PipelineResult) {
        let summary = result.summary().to_string();
        let details = result.details();
        let conversation = self.active_mut();
        conversation.summary = summary;
        conversation.details = details;
    }

    /// Stores a file report. An enhanced-mode response only replaces the summary.
    pub fn apply_report(&mut self, result: &PipelineResult) {
        match &result.artifacts {
            Artifacts::Response { text } => self.active_mut().summary = text.clone(),
            _ => self.apply_result(result),
        }
    }

    pub fn record_report_failure(&mut self) {
        let conversation = self.active_mut();
        conversation.summary = REPORT_FAILED_SUMMARY.to_string();
        conversation.details = REPORT_FAILED_DETAILS.to_string();
    }
}

fn timestamp_name() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
