// pollwatch-api: Async Rust client for the device-management API

pub mod client;
pub mod error;
pub mod models;
pub mod networks;
pub mod polling;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
