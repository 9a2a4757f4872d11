//! HTTP client utilities for talking to the beautify service.
//!
//! This module provides client construction, header injection and the
//! one-shot JSON request helper shared by the providers.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use crate::client::{ClientError, REQUEST_FAILED_MESSAGE};
use crate::model::Envelope;
use crate::options::TransportOptions;

/// Build a configured HTTP client from transport options.
///
/// This applies common configuration like timeouts and proxies.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, ClientError> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ClientError::Config(format!("invalid proxy {proxy_url:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Add extra headers to a request if specified in transport options.
///
/// # Example
/// ```ignore
/// let mut req = client.post(url);
/// req = add_extra_headers(req, &transport_options.extra_headers);
/// ```
pub fn add_extra_headers(
    mut request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
) -> RequestBuilder {
    if let Some(headers) = extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}

/// Send a one-shot request and unwrap the service's response envelope.
///
/// A non-success HTTP status or a non-zero `code` becomes
/// [`ClientError::Service`] carrying the envelope `message`, or a generic
/// failure message when there is none. On success the envelope `data` is
/// returned as is; `None` when it is `null` or missing.
pub async fn request_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, len = body.len(), "received envelope");

    let envelope: Envelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        // Error pages are rarely envelopes; report the status instead
        Err(_) if !status.is_success() => return Err(ClientError::Status(status)),
        Err(e) => return Err(e.into()),
    };

    if !status.is_success() || !envelope.is_success() {
        let message = envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string());
        return Err(ClientError::Service(message));
    }

    Ok(envelope.data)
}
