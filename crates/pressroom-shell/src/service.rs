//! The backend calls the attribution flow depends on.

use async_trait::async_trait;
use pressroom_client::{ApiClient, ApiError};
use pressroom_common::models::HashRecord;

#[async_trait]
pub trait HashService: Send + Sync {
    async fn create_hash(&self, hash: &str, sid: Option<&str>) -> Result<HashRecord, ApiError>;
    async fn check_hash(&self, hash: &str) -> Result<HashRecord, ApiError>;
}

#[async_trait]
impl HashService for ApiClient {
    async fn create_hash(&self, hash: &str, sid: Option<&str>) -> Result<HashRecord, ApiError> {
        ApiClient::create_hash(self, hash, sid).await
    }

    async fn check_hash(&self, hash: &str) -> Result<HashRecord, ApiError> {
        ApiClient::check_hash(self, hash).await
    }
}
