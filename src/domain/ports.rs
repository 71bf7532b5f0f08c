use crate::domain::model::{GenerationRequest, ServiceRecord, Source};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Makes sure the storage root exists. Called once before the first write.
    fn prepare(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Turns an in-memory source into a record. File sources are loaded by the caller first.
pub trait SourceReader {
    fn read(&self, source: &Source) -> Result<ServiceRecord>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: GenerationRequest) -> Result<String>;
}
