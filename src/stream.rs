//! Turning a chunked response body into beautify stream events.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::client::{ClientError, REQUEST_FAILED_MESSAGE};
use crate::sse::{parse_frame, FrameDecoder};

pub use crate::model::StreamEvent;

/// Message of the error event yielded when the body ends without a terminal frame.
pub const INCOMPLETE_STREAM_MESSAGE: &str = "stream ended before completion";

/// Receiver for stream events.
///
/// Every method defaults to doing nothing, so a handler only implements the
/// outcomes it cares about.
pub trait StreamHandler {
    /// A fragment of the beautified output.
    fn on_content(&mut self, _text: &str) {}

    /// The stream completed successfully.
    fn on_done(&mut self) {}

    /// The stream failed; `message` is meant to be shown verbatim.
    fn on_error(&mut self, _message: &str) {}
}

struct ReadState<S> {
    bytes: S,
    decoder: FrameDecoder,
    events: VecDeque<StreamEvent>,
}

impl<S> ReadState<S> {
    /// Classify `lines`, stopping at the first terminal event.
    fn queue_lines(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            for event in parse_frame(&line) {
                let terminal = event.is_terminal();
                self.events.push_back(event);
                if terminal {
                    return;
                }
            }
        }
    }
}

/// Decode a byte stream into beautify events.
///
/// The returned stream yields zero or more `Content` events, then exactly one
/// terminal item, then ends:
/// - `Done` or `Error` as sent by the server;
/// - `Err` when reading the body fails;
/// - `Error(INCOMPLETE_STREAM_MESSAGE)` when the body ends without a terminal frame.
///
/// Lines buffered behind a terminal frame are discarded. The byte stream is
/// dropped as soon as the terminal item is produced, or when the returned
/// stream is dropped.
pub fn event_stream<S, E>(bytes: S) -> impl Stream<Item = Result<StreamEvent, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    ClientError: From<E>,
{
    let state = ReadState {
        bytes: Box::pin(bytes),
        decoder: FrameDecoder::new(),
        events: VecDeque::new(),
    };

    stream::unfold(Some(state), |state| async move {
        let mut state = state?;
        loop {
            if let Some(event) = state.events.pop_front() {
                if event.is_terminal() {
                    trace!(?event, "terminal event");
                    return Some((Ok(event), None));
                }
                return Some((Ok(event), Some(state)));
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    trace!(len = chunk.len(), "received chunk");
                    let lines = state.decoder.push(&chunk);
                    state.queue_lines(lines);
                }
                Some(Err(e)) => {
                    return Some((Err(ClientError::from(e)), None));
                }
                None => {
                    let decoder = std::mem::take(&mut state.decoder);
                    state.queue_lines(decoder.finish());
                    if !state.events.back().is_some_and(StreamEvent::is_terminal) {
                        debug!("body ended without a terminal frame");
                        state
                            .events
                            .push_back(StreamEvent::Error(INCOMPLETE_STREAM_MESSAGE.to_string()));
                    }
                }
            }
        }
    })
}

/// Drive `events` into `handler` until a terminal event, or until `cancel` fires.
///
/// Read errors are reported through `on_error`. Cancellation is checked
/// before every read; when it fires the event stream (and with it the
/// underlying connection) is dropped and [`ClientError::Aborted`] is
/// returned without invoking the handler.
pub async fn consume<S, H>(
    events: S,
    handler: &mut H,
    cancel: Option<&CancellationToken>,
) -> Result<(), ClientError>
where
    S: Stream<Item = Result<StreamEvent, ClientError>>,
    H: StreamHandler + ?Sized,
{
    let mut events = std::pin::pin!(events);

    loop {
        let next = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("beautify stream cancelled");
                        return Err(ClientError::Aborted);
                    }
                    next = events.next() => next,
                }
            }
            None => events.next().await,
        };

        match next {
            Some(Ok(StreamEvent::Content(text))) => handler.on_content(&text),
            Some(Ok(StreamEvent::Done)) => {
                handler.on_done();
                return Ok(());
            }
            Some(Ok(StreamEvent::Error(message))) => {
                handler.on_error(&message);
                return Ok(());
            }
            Some(Err(e)) => {
                let message = e.to_string();
                if message.is_empty() {
                    handler.on_error(REQUEST_FAILED_MESSAGE);
                } else {
                    handler.on_error(&message);
                }
                return Ok(());
            }
            None => return Ok(()),
        }
    }
}
