pub mod prompt_pipeline;

pub use prompt_pipeline::{PipelineRequest, PromptPipeline};
