//! Clients for the external services the bot delegates to.
//!
//! This crate provides thin async HTTP clients for:
//! - The LUIS intent classifier
//! - The TMDb movie catalog
//! - The Text Analytics sentiment scorer
//!
//! Each client implements a trait from [`traits`] so the dialog layer can be
//! exercised against in-process fakes. All clients share the timeout and
//! single-retry policy in [`http`].

use thiserror::Error;

pub mod http;
pub mod luis;
pub mod nlu;
pub mod sentiment;
pub mod tmdb;
pub mod traits;

pub use http::{HttpOptions, RetryPolicy};
pub use luis::{LuisClient, LuisSettings};
pub use nlu::{entity_types, ClassifiedMessage, Entity, Intent, Resolution};
pub use sentiment::{SentimentSettings, TextAnalyticsClient};
pub use tmdb::{TmdbClient, TmdbSettings};
pub use traits::{IntentClassifier, MovieCatalog, SentimentScorer};

/// Errors that can occur when calling an external service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

/// Convenience alias for results of service calls
pub type Result<T> = std::result::Result<T, ClientError>;
