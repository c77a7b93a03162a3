use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Rate limit exceeded{}", retry_hint(.0))]
    RateLimited(Option<u64>),

    #[error("Completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Failed to extract document text: {0}")]
    Extraction(String),

    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Please enter a query to search.")]
    EmptyQuery,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Cannot delete the last conversation.")]
    LastConversation,

    #[error("Conversation already exists: {0}")]
    DuplicateConversation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {} seconds", secs),
        None => String::new(),
    }
}

impl Error {
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited(_) | Error::Transport(_) => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Server-provided wait hint, if any.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimited(secs) => *secs,
            _ => None,
        }
    }
}
