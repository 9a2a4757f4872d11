//! Core client traits and error types.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::model::{BeautifyRequest, StreamEvent};
use crate::stream::{consume, StreamHandler};

/// Message handed to `on_error` when the stream could not be opened.
pub const NETWORK_ERROR_MESSAGE: &str = "network error";

/// Fallback message for failures that carry no text of their own.
pub const REQUEST_FAILED_MESSAGE: &str = "request failed";

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Service(String),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("response has no body")]
    EmptyBody,

    /// The caller cancelled the operation.
    #[error("Aborted")]
    Aborted,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this error stems from caller cancellation rather than a failure.
    pub fn is_aborted(&self) -> bool {
        matches!(self, ClientError::Aborted)
    }
}

/// One-shot beautify requests.
///
/// Implement this trait to point the crate at a different backend. The
/// HTTP implementation lives in [`crate::providers::BeautifyClient`].
#[async_trait]
pub trait Client: Send + Sync {
    /// Beautify `request` in a single round trip.
    ///
    /// Returns the `data` member of the service's response envelope, or
    /// `Value::Null` when the envelope carries none.
    async fn beautify(&self, request: &BeautifyRequest) -> Result<serde_json::Value, ClientError>;
}

/// Extension trait for incremental (streaming) beautify.
///
/// # Required Methods
/// - `beautify_stream`: opens the stream and returns its events
///
/// # Provided Methods
/// - `beautify_stream_with`: drives the stream into a [`StreamHandler`], honoring cancellation
///
/// # Example
/// ```rust,ignore
/// struct Collect(String);
///
/// impl StreamHandler for Collect {
///     fn on_content(&mut self, text: &str) {
///         self.0.push_str(text);
///     }
/// }
///
/// let token = CancellationToken::new();
/// let mut collect = Collect(String::new());
/// client
///     .beautify_stream_with(&request, &mut collect, Some(&token))
///     .await?;
/// ```
#[async_trait]
pub trait StreamingClient: Client {
    /// Open a stream for `request`.
    ///
    /// An `Err` means the stream could not be opened at all (send failure, a
    /// non-success status, or a response without a body). Once opened, the returned stream yields zero or more
    /// `Content` events followed by exactly one terminal item and then ends.
    async fn beautify_stream(
        &self,
        request: &BeautifyRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, ClientError>>, ClientError>;

    /// Stream `request` into `handler`.
    ///
    /// Every failure is reported through `handler.on_error`; the only error
    /// returned is [`ClientError::Aborted`] when `cancel` fires before the
    /// stream finishes. No callback fires after cancellation.
    async fn beautify_stream_with<H>(
        &self,
        request: &BeautifyRequest,
        handler: &mut H,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), ClientError>
    where
        H: StreamHandler + Send,
    {
        let opened = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("beautify stream cancelled before the response arrived");
                        return Err(ClientError::Aborted);
                    }
                    opened = self.beautify_stream(request) => opened,
                }
            }
            None => self.beautify_stream(request).await,
        };

        let events = match opened {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "failed to open beautify stream");
                handler.on_error(NETWORK_ERROR_MESSAGE);
                return Ok(());
            }
        };

        consume(events, handler, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream::{self, StreamExt};

    use crate::stream::event_stream;

    /// Serves canned chunks, or fails to open when `chunks` is `None`.
    struct CannedClient {
        chunks: Option<Vec<&'static str>>,
    }

    #[async_trait]
    impl Client for CannedClient {
        async fn beautify(
            &self,
            _request: &BeautifyRequest,
        ) -> Result<serde_json::Value, ClientError> {
            Ok(serde_json::Value::Null)
        }
    }

    #[async_trait]
    impl StreamingClient for CannedClient {
        async fn beautify_stream(
            &self,
            _request: &BeautifyRequest,
        ) -> Result<BoxStream<'static, Result<StreamEvent, ClientError>>, ClientError> {
            let chunks = self
                .chunks
                .clone()
                .ok_or(ClientError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))?;
            let bytes = stream::iter(
                chunks
                    .into_iter()
                    .map(|c| Ok::<_, ClientError>(Bytes::from_static(c.as_bytes()))),
            );
            Ok(event_stream(bytes).boxed())
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<StreamEvent>);

    impl StreamHandler for Recorder {
        fn on_content(&mut self, text: &str) {
            self.0.push(StreamEvent::Content(text.to_string()));
        }

        fn on_done(&mut self) {
            self.0.push(StreamEvent::Done);
        }

        fn on_error(&mut self, message: &str) {
            self.0.push(StreamEvent::Error(message.to_string()));
        }
    }

    fn request() -> BeautifyRequest {
        BeautifyRequest::new("<p>hi</p>", "tech-blue")
    }

    #[tokio::test]
    async fn test_stream_with_dispatches_events() {
        let client = CannedClient {
            chunks: Some(vec![
                "data: {\"content\":\"He\"}\n",
                "data: {\"content\":\"llo\"}\ndata: {\"done\":true}\n",
            ]),
        };
        let mut recorder = Recorder::default();

        let result = client
            .beautify_stream_with(&request(), &mut recorder, None)
            .await;

        assert!(result.is_ok());
        assert_eq!(
            recorder.0,
            vec![
                StreamEvent::Content("He".to_string()),
                StreamEvent::Content("llo".to_string()),
                StreamEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_open_failure_reports_network_error() {
        let client = CannedClient { chunks: None };
        let mut recorder = Recorder::default();

        let result = client
            .beautify_stream_with(&request(), &mut recorder, None)
            .await;

        assert!(result.is_ok());
        assert_eq!(
            recorder.0,
            vec![StreamEvent::Error(NETWORK_ERROR_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_without_callbacks() {
        let client = CannedClient {
            chunks: Some(vec!["data: {\"content\":\"x\"}\n"]),
        };
        let token = CancellationToken::new();
        token.cancel();
        let mut recorder = Recorder::default();

        let result = client
            .beautify_stream_with(&request(), &mut recorder, Some(&token))
            .await;

        assert!(matches!(result, Err(ClientError::Aborted)));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_is_aborted() {
        assert!(ClientError::Aborted.is_aborted());
        assert!(!ClientError::Service("x".to_string()).is_aborted());
    }
}
