use std::future::Future;

use tracing::debug;

use crate::form::payload::SubmissionRequest;
use crate::submit::endpoint::EndpointBinding;
use crate::submit::error::TransportError;

/// Status and body of whatever the endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one encoded submission to a bound endpoint.
pub trait SubmissionTransport: Send + Sync {
    fn post(
        &self,
        binding: &EndpointBinding,
        request: &SubmissionRequest<'_>,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// JSON-over-HTTP transport backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SubmissionTransport for HttpTransport {
    async fn post(
        &self,
        binding: &EndpointBinding,
        request: &SubmissionRequest<'_>,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(&binding.url).json(request);
        if let Some(auth) = &binding.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // The body only matters for diagnostics.
        let body = response.text().await.unwrap_or_default();
        debug!(url = %binding.url, status, "endpoint responded");

        Ok(TransportResponse { status, body })
    }
}
