//! Transport configuration.
//!
//! Options are plain structs with builder-style setters, so a client can be
//! configured in code:
//!
//! ```rust
//! use beautify::options::TransportOptions;
//! use std::time::Duration;
//!
//! let options = TransportOptions::new()
//!     .with_base_url("http://beautify.internal:3000".to_string())
//!     .with_timeout(Duration::from_secs(30));
//! assert_eq!(options.base_url(), "http://beautify.internal:3000");
//! ```
//!
//! or from the environment with [`TransportOptions::from_env`].

use std::collections::HashMap;
use std::time::Duration;

use crate::client::ClientError;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "BEAUTIFY_BASE_URL";

/// Environment variable holding a request timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "BEAUTIFY_TIMEOUT_SECS";

/// Environment variable holding an HTTP proxy URL.
pub const PROXY_ENV: &str = "BEAUTIFY_PROXY";

/// HTTP transport options for the beautify service.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Overall request timeout. Applies to the whole stream, so leave it unset
    /// for long-running beautify streams and cancel instead.
    pub timeout: Option<Duration>,

    /// Base URL of the service, without a trailing slash
    pub base_url: Option<String>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `BEAUTIFY_BASE_URL`, `BEAUTIFY_TIMEOUT_SECS` and
    /// `BEAUTIFY_PROXY`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut options = Self::new();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            options = options.with_base_url(base_url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))
            })?;
            options = options.with_timeout(Duration::from_secs(secs));
        }

        if let Some(proxy) = lookup(PROXY_ENV).filter(|v| !v.is_empty()) {
            options = options.with_proxy(proxy);
        }

        Ok(options)
    }

    /// The configured base URL, or [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}
