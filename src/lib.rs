pub mod config;
pub mod error;
pub mod models;
pub mod llm;
pub mod extract;
pub mod pipeline;
pub mod shell;

pub use config::{Config, PipelineConfig, RetryConfig};
pub use error::{Error, Result};
pub use llm::{CompletionService, GroqProvider, RetryingProvider};
pub use pipeline::{PipelineRequest, PromptPipeline};
pub use shell::{Session, Shell};
