//! Streaming beautify example.
//!
//! Run with:
//! ```bash
//! export BEAUTIFY_BASE_URL="http://127.0.0.1:3000"
//! cargo run --example beautify_stream -- tech-blue '<h1>Hello</h1>'
//! ```
//!
//! Press Ctrl-C to cancel the stream.

use std::io::Write;

use beautify::providers::BeautifyClient;
use beautify::{styles, BeautifyRequest, StreamHandler, StreamingClient};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Prints fragments as they arrive and keeps the assembled result.
#[derive(Default)]
struct Printer {
    output: String,
    failed: bool,
}

impl StreamHandler for Printer {
    fn on_content(&mut self, text: &str) {
        self.output.push_str(text);
        print!("{}", text);
        // Flush stdout to show text immediately
        let _ = std::io::stdout().flush();
    }

    fn on_done(&mut self) {
        println!("\n\n=== Stream Complete ({} bytes) ===", self.output.len());
    }

    fn on_error(&mut self, message: &str) {
        self.failed = true;
        eprintln!("\nError in stream: {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let style = match args.next() {
        Some(id) => styles::style_by_id(&id).ok_or_else(|| format!("unknown style: {id}"))?,
        None => styles::default_style(),
    };
    let html = args
        .next()
        .unwrap_or_else(|| "<h1>Hello</h1><p>Rust</p>".to_string());

    let client = BeautifyClient::from_env()?;
    let request = BeautifyRequest::with_style(html, style);

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    println!("Streaming '{}' from {}...\n", style.name, client.transport_options().base_url());

    let mut printer = Printer::default();
    match client
        .beautify_stream_with(&request, &mut printer, Some(&token))
        .await
    {
        Ok(()) if printer.failed => std::process::exit(1),
        Ok(()) => Ok(()),
        Err(e) if e.is_aborted() => {
            eprintln!("\nCancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
