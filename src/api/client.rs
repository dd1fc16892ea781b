use crate::api::models::{
    Profile, Quote, QuoteRequest, Recipient, RecipientRequest, Transfer, TransferRequest,
};
use crate::api::ports::PayoutApi;
use crate::utils::error::{PayoutError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

const TRACE_ID_HEADER: &str = "x-trace-id";

/// REST client for the payments sandbox API. The bearer token is injected at
/// construction and attached to every request; an empty token is sent as-is,
/// the first request then fails with an authorization error.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("📡 GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        self.decode(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("📡 POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        self.decode(path, response).await
    }

    /// Schema validation happens here, at the transport boundary; the
    /// pipeline only ever sees typed responses.
    async fn decode<T: DeserializeOwned>(&self, endpoint: &str, response: Response) -> Result<T> {
        let status = response.status();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("Status {}", status.as_u16());
            tracing::error!("Trace ID: {}", trace_id.as_deref().unwrap_or("<none>"));
            tracing::error!("{}", body);
            return Err(PayoutError::ApiError {
                status: status.as_u16(),
                trace_id,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| PayoutError::SchemaError {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PayoutApi for ApiClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.get_json("/v2/profiles").await
    }

    async fn create_quote(&self, profile_id: &str, request: &QuoteRequest) -> Result<Quote> {
        self.post_json(&format!("/v3/profiles/{}/quotes", profile_id), request)
            .await
    }

    async fn create_recipient(&self, request: &RecipientRequest) -> Result<Recipient> {
        self.post_json("/v1/accounts", request).await
    }

    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer> {
        self.post_json("/v1/transfers", request).await
    }
}
