//! Client for the platform's private HTTP API

pub mod client;
pub mod decoder;
pub mod types;

pub use client::DegiroClient;
pub use types::ApiError;
