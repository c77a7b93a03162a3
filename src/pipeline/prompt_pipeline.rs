use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::llm::prompts::{self, ChainStep};
use crate::llm::{split_summary_details, CompletionService};
use crate::models::{
    Artifacts, ChatMessage, CompletionRequest, ModelId, PipelineResult, ReasoningMode,
    StepArtifacts, TaskType,
};

/// Everything one pipeline invocation needs.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub query: String,
    pub model: ModelId,
    pub mode: ReasoningMode,
    pub system_prompt: String,
    pub context: String,
    /// Exemplar selector; only consulted in multi-path mode.
    pub task: Option<TaskType>,
}

impl PipelineRequest {
    pub fn new(query: impl Into<String>, model: ModelId, mode: ReasoningMode) -> Self {
        Self {
            query: query.into(),
            model,
            mode,
            system_prompt: String::new(),
            context: String::new(),
            task: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_task(mut self, task: Option<TaskType>) -> Self {
        self.task = task;
        self
    }
}

pub struct PromptPipeline {
    llm: Arc<dyn CompletionService>,
    config: PipelineConfig,
}

impl PromptPipeline {
    pub fn new(llm: Arc<dyn CompletionService>, config: PipelineConfig) -> Self {
        Self { llm, config }
    }

    /// Runs the shape selected by `request.mode`.
    ///
    /// Any failed completion aborts the whole run; partial artifacts are never returned.
    pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineResult> {
        tracing::info!(
            "Running {} pipeline on {} via {}",
            request.mode,
            request.model.as_str(),
            self.llm.name()
        );

        let artifacts = match request.mode {
            ReasoningMode::SinglePath | ReasoningMode::MultiPath => {
                let (summary, details) = self.search_and_summarize(request).await?;
                Artifacts::Report { summary, details }
            }
            ReasoningMode::AdvanceSteps => {
                Artifacts::Steps(self.advance_steps(&request.query, &request.model).await?)
            }
            ReasoningMode::EnhancedSystemPrompt => Artifacts::Response {
                text: self.enhanced(&request.query, &request.model).await?,
            },
        };

        Ok(PipelineResult::new(request.mode, artifacts))
    }

    async fn search_and_summarize(&self, request: &PipelineRequest) -> Result<(String, String)> {
        let query = match (request.mode, request.task) {
            (ReasoningMode::MultiPath, Some(task)) => {
                tracing::debug!("Appending {} exemplar", task);
                prompts::with_exemplar(&request.query, task)
            }
            _ => request.query.clone(),
        };

        let messages = vec![
            ChatMessage::system(request.system_prompt.as_str()),
            ChatMessage::user(prompts::report_user_message(
                &query,
                &request.context,
                request.mode,
            )),
        ];

        let response = self
            .call(
                "Searching and summarizing...",
                CompletionRequest::new(request.model.clone(), messages, self.config.max_output_tokens),
            )
            .await?;

        let (summary, details) = split_summary_details(&response);
        if summary.trim().is_empty() || details.trim().is_empty() {
            return Err(Error::MalformedResponse(
                "completion had an empty summary or details section".to_string(),
            ));
        }
        Ok((summary, details))
    }

    async fn advance_steps(&self, query: &str, model: &ModelId) -> Result<StepArtifacts> {
        let improved_prompt = self.chain_step(ChainStep::Refine, query, model).await?;
        let generated_response = self
            .chain_step(ChainStep::Respond, &improved_prompt, model)
            .await?;
        let review_feedback = self
            .chain_step(ChainStep::Review, &generated_response, model)
            .await?;
        let analysis_summary = self
            .chain_step(ChainStep::Summarize, &review_feedback, model)
            .await?;

        Ok(StepArtifacts {
            improved_prompt,
            generated_response,
            review_feedback,
            analysis_summary,
        })
    }

    async fn chain_step(&self, step: ChainStep, input: &str, model: &ModelId) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(role) = step.system_role() {
            messages.push(ChatMessage::system(role));
        }
        messages.push(ChatMessage::user(step.user_message(input)));

        let max_tokens = match step {
            ChainStep::Respond => self.config.max_output_tokens,
            _ => self.config.step_max_tokens,
        };

        self.call(
            step.progress_label(),
            CompletionRequest::new(model.clone(), messages, max_tokens),
        )
        .await
    }

    async fn enhanced(&self, query: &str, model: &ModelId) -> Result<String> {
        let messages = vec![
            ChatMessage::system(prompts::enhanced_system_prompt(query)),
            ChatMessage::user(query),
        ];

        self.call(
            "Generating enhanced prompt response...",
            CompletionRequest::new(model.clone(), messages, self.config.max_output_tokens),
        )
        .await
    }

    async fn call(&self, label: &'static str, request: CompletionRequest) -> Result<String> {
        let spinner = self.spinner(label);
        let result = self.llm.complete(request).await;
        spinner.finish_and_clear();

        if let Err(ref e) = result {
            tracing::warn!("{} failed: {}", label.trim_end_matches("..."), e);
        }
        result
    }

    fn spinner(&self, label: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(label);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
