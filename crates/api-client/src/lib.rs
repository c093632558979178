//! HTTP client for the me-api portfolio backend
//!
//! This crate provides a small, resilient client for the profile, projects,
//! search and health endpoints of the me-api REST service.
//!
//! # Features
//!
//! - **Environment-based configuration**: Base URL and API version from environment variables
//! - **Normalized URLs**: Trailing/leading slashes collapsed, multi-value query parameters
//! - **Rate-limit retry**: `429` responses are retried after `Retry-After`, up to a fixed budget
//! - **Classified errors**: Network, CORS, HTTP status and parse failures are distinct
//! - **Search normalization**: Heterogeneous search payloads become one ranked list
//! - **Request correlation**: Every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use me_api_client::{ClientConfig, MeApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://api.example.com", Some("v1"))?;
//!     let client = MeApiClient::with_config(config)?;
//!
//!     // Health checks never fail; errors come back as a status
//!     let health = client.health().check().await;
//!     println!("API healthy: {}", health.is_ok());
//!
//!     let projects = client.projects().list(Some("rust")).await?;
//!     println!("Got {} projects", projects.len());
//!
//!     for hit in client.search().query("parser").await {
//!         println!("{} {} ({})", hit.kind, hit.name, hit.score);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
mod cors;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod request;

pub use client::MeApiClient;
pub use config::ClientConfig;
pub use endpoint::EndpointConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use request::{ApiRequest, Envelope};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MeApiClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoint::EndpointConfig;
    pub use crate::endpoints::{
        HealthApi, HealthStatus, ProfileApi, ProjectsApi, ResultKind, SearchApi, SearchResult,
    };
    pub use crate::error::{ApiError, ApiResult, ErrorKind};
    pub use crate::query::{QueryParams, QueryValue};
    pub use crate::request::{ApiRequest, Envelope};
}
