//! One-shot beautify example.
//!
//! Run with:
//! ```bash
//! cargo run --example beautify_once -- dark-elegant '<section>Hi</section>'
//! ```

use beautify::providers::BeautifyClient;
use beautify::{styles, BeautifyRequest, Client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let style_id = args
        .next()
        .unwrap_or_else(|| styles::default_style().id.to_string());
    let html = args
        .next()
        .unwrap_or_else(|| "<h1>Hello</h1>".to_string());

    println!("Available styles:");
    for style in styles::all() {
        let marker = if style.id == style_id { "*" } else { " " };
        println!(" {} {:<16} {}", marker, style.id, style.description);
    }
    println!();

    let client = BeautifyClient::from_env()?;
    let data = client
        .beautify(&BeautifyRequest::new(html, style_id))
        .await?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
