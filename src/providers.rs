//! Beautify service implementations.

pub mod remote;

// Re-export for convenience
pub use remote::BeautifyClient;
