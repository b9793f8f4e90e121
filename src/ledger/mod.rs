mod client;
mod config;
pub mod error;
mod r#trait;

pub use client::HttpLedgerClient;
pub use config::LedgerConfig;
pub use r#trait::LedgerClient;
