use async_trait::async_trait;
use crate::error::Result;
use crate::models::CompletionRequest;

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
    fn name(&self) -> &str;
}
