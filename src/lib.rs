//! # beautify - HTML beautify service client
//!
//! A small async client for a remote "beautify" service: submit HTML markup
//! together with a visual style, and receive the restyled markup either in a
//! single response or incrementally as a stream of Server-Sent Events.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Trait-based client design (`Client`, `StreamingClient`)
//! - Streaming via SSE with chunk-boundary-safe UTF-8 decoding
//! - Cooperative cancellation with `CancellationToken`
//! - Built-in style catalog
//!
//! ## Stream contract
//!
//! A stream yields zero or more [`StreamEvent::Content`] fragments followed by
//! exactly one terminal event ([`StreamEvent::Done`] or [`StreamEvent::Error`]).
//! Cancelling the token ends the stream with [`ClientError::Aborted`] instead,
//! which callers can tell apart from a service failure.
//!
//! ## Example
//! ```no_run
//! use beautify::{styles, BeautifyRequest, StreamHandler, StreamingClient};
//! use beautify::options::TransportOptions;
//! use beautify::providers::BeautifyClient;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Printer(String);
//!
//! impl StreamHandler for Printer {
//!     fn on_content(&mut self, text: &str) {
//!         self.0.push_str(text);
//!     }
//!
//!     fn on_error(&mut self, message: &str) {
//!         eprintln!("beautify failed: {message}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BeautifyClient::new(TransportOptions::new())?;
//!     let request = BeautifyRequest::with_style("<h1>Hello</h1>", styles::default_style());
//!     let token = CancellationToken::new();
//!
//!     let mut printer = Printer(String::new());
//!     client
//!         .beautify_stream_with(&request, &mut printer, Some(&token))
//!         .await?;
//!     println!("{}", printer.0);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod model;
pub mod options;
pub mod providers;
pub mod sse;
pub mod stream;
pub mod styles;

// Re-exports for convenience
pub use client::{Client, ClientError, StreamingClient};
pub use model::{BeautifyRequest, StreamEvent};
pub use stream::StreamHandler;
pub use styles::Style;
