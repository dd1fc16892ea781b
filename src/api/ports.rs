use crate::api::models::{
    Profile, Quote, QuoteRequest, Recipient, RecipientRequest, Transfer, TransferRequest,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The four remote operations the transfer pipeline depends on.
#[async_trait]
pub trait PayoutApi: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    async fn create_quote(&self, profile_id: &str, request: &QuoteRequest) -> Result<Quote>;
    async fn create_recipient(&self, request: &RecipientRequest) -> Result<Recipient>;
    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer>;
}
