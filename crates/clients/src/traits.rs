//! Seams between the dialog layer and the external services.
//!
//! The HTTP clients in this crate implement these; tests implement them
//! with canned answers.

use async_trait::async_trait;
use catalog::{CatalogQuery, CatalogResult};

use crate::nlu::ClassifiedMessage;
use crate::Result;

/// Assigns an intent and entities to raw utterance text
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, utterance: &str) -> Result<ClassifiedMessage>;
}

/// Looks up movies matching a query
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn discover(&self, query: &CatalogQuery) -> Result<CatalogResult>;
}

/// Scores free text from 0.0 (negative) to 1.0 (positive)
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score(&self, text: &str) -> Result<f64>;
}
