pub mod provider;
pub mod groq;
pub mod prompts;
pub mod parser;
pub mod retry;

pub use provider::CompletionService;
pub use groq::GroqProvider;
pub use prompts::ChainStep;
pub use parser::split_summary_details;
pub use retry::RetryingProvider;
