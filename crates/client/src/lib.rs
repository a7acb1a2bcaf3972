//! # Manifest Client
//!
//! Async client for the manifest exception document-intelligence API.
//!
//! This crate contains:
//! - Credential and endpoint configuration loading
//! - The HTTP transport wrapper over `reqwest`
//! - The batch processing client (auth, submit, poll, health)
//!
//! ## Architecture
//! - Wire and domain types live in `manifest-domain`
//! - All I/O flows through [`http::HttpClient`]
//! - [`client::ManifestClient`] owns the bearer token for the session

pub mod client;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use client::ManifestClient;
pub use config::{ClientConfig, ConfigError};
pub use http::{HttpClient, HttpClientBuilder};
