//! Text Analytics v2.0 sentiment client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::http::{decode_json, send_with_retry, HttpOptions, RetryPolicy};
use crate::traits::SentimentScorer;
use crate::{ClientError, Result};

const SERVICE: &str = "Text Analytics";

/// Regional endpoint used when none is configured
pub const DEFAULT_TEXT_ANALYTICS_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Clone)]
pub struct SentimentSettings {
    pub endpoint: String,
    pub api_key: String,
}

impl SentimentSettings {
    fn sentiment_url(&self) -> String {
        format!(
            "{}/text/analytics/v2.0/sentiment",
            self.endpoint.trim_end_matches('/')
        )
    }
}

/// Client for the sentiment scoring endpoint
pub struct TextAnalyticsClient {
    client: Client,
    settings: SentimentSettings,
    retry: RetryPolicy,
}

impl TextAnalyticsClient {
    pub fn new(settings: SentimentSettings, options: HttpOptions) -> Result<Self> {
        info!("Using sentiment service at {}", settings.endpoint);
        Ok(Self {
            client: options.build_client()?,
            settings,
            retry: options.retry,
        })
    }
}

#[async_trait]
impl SentimentScorer for TextAnalyticsClient {
    async fn score(&self, text: &str) -> Result<f64> {
        let url = self.settings.sentiment_url();
        let request = SentimentRequest::single(text);

        let response = send_with_retry(SERVICE, self.retry, || {
            self.client
                .post(&url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.settings.api_key)
                .json(&request)
        })
        .await?;

        let body: SentimentResponse = decode_json(SERVICE, response).await?;
        let score = body.first_score()?;
        debug!("Sentiment score {:.3}", score);
        Ok(score)
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: [RequestDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestDocument<'a> {
    language: &'static str,
    id: &'static str,
    text: &'a str,
}

impl<'a> SentimentRequest<'a> {
    fn single(text: &'a str) -> Self {
        Self {
            documents: [RequestDocument {
                language: "en",
                id: "1",
                text,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    documents: Vec<ScoredDocument>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct ScoredDocument {
    score: f64,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    #[serde(default)]
    message: String,
}

impl SentimentResponse {
    fn first_score(&self) -> Result<f64> {
        if let Some(doc) = self.documents.first() {
            return Ok(doc.score);
        }
        let reason = self
            .errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "no scored documents".to_string());
        Err(ClientError::InvalidResponse {
            service: SERVICE,
            reason,
        })
    }
}
