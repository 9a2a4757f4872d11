//! HTTP client for the beautify service.
//!
//! Implements [`Client`] against `POST /beautify` and [`StreamingClient`]
//! against `POST /api/beautify/stream`.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::client::{Client, ClientError, StreamingClient};
use crate::http::{add_extra_headers, build_http_client, request_json};
use crate::model::{BeautifyRequest, StreamEvent};
use crate::options::TransportOptions;
use crate::stream::event_stream;

const BEAUTIFY_PATH: &str = "/beautify";
const BEAUTIFY_STREAM_PATH: &str = "/api/beautify/stream";

/// Beautify client using HTTP transport.
#[derive(Debug, Clone)]
pub struct BeautifyClient {
    http: reqwest::Client,
    transport_options: TransportOptions,
}

impl BeautifyClient {
    /// Create a client with the given transport options.
    pub fn new(transport_options: TransportOptions) -> Result<Self, ClientError> {
        let http = build_http_client(&transport_options)?;
        Ok(Self {
            http,
            transport_options,
        })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(TransportOptions::from_env()?)
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }

    fn post(&self, path: &str, request: &BeautifyRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.transport_options.base_url(), path);
        debug!(%url, style = %request.style, len = request.html_code.len(), "sending beautify request");

        let req = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        add_extra_headers(req, &self.transport_options.extra_headers).json(request)
    }
}

#[async_trait]
impl Client for BeautifyClient {
    async fn beautify(&self, request: &BeautifyRequest) -> Result<serde_json::Value, ClientError> {
        let data = request_json(self.post(BEAUTIFY_PATH, request)).await?;
        Ok(data.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl StreamingClient for BeautifyClient {
    async fn beautify_stream(
        &self,
        request: &BeautifyRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, ClientError>>, ClientError> {
        let response = self
            .post(BEAUTIFY_STREAM_PATH, request)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%status, "beautify stream rejected");
            return Err(ClientError::Status(status));
        }

        if has_no_body(status, response.content_length()) {
            warn!(%status, "beautify stream response has no body");
            return Err(ClientError::EmptyBody);
        }

        Ok(event_stream(response.bytes_stream()).boxed())
    }
}

/// Whether a response can carry no readable event body.
fn has_no_body(status: StatusCode, content_length: Option<u64>) -> bool {
    status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || content_length == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_defaults() {
        let client = BeautifyClient::new(TransportOptions::new()).unwrap();
        assert_eq!(
            client.transport_options().base_url(),
            crate::options::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_has_no_body() {
        assert!(has_no_body(StatusCode::NO_CONTENT, None));
        assert!(has_no_body(StatusCode::RESET_CONTENT, None));
        assert!(has_no_body(StatusCode::OK, Some(0)));
        assert!(!has_no_body(StatusCode::OK, None));
        assert!(!has_no_body(StatusCode::OK, Some(42)));
    }
}
