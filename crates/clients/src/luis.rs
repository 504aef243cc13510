//! LUIS v2 intent classifier client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::http::{decode_json, send_with_retry, HttpOptions, RetryPolicy};
use crate::nlu::{ClassifiedMessage, Entity, Intent, Resolution};
use crate::traits::IntentClassifier;
use crate::Result;

const SERVICE: &str = "LUIS";

/// Regional endpoint used when none is configured
pub const DEFAULT_LUIS_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com";

/// Where to find the published LUIS app
#[derive(Debug, Clone)]
pub struct LuisSettings {
    pub endpoint: String,
    pub app_id: String,
    pub api_key: String,
}

impl LuisSettings {
    /// Full prediction URL: `{endpoint}/luis/v2.0/apps/{app_id}`
    pub fn app_url(&self) -> String {
        format!(
            "{}/luis/v2.0/apps/{}",
            self.endpoint.trim_end_matches('/'),
            self.app_id
        )
    }
}

/// Client for the LUIS prediction endpoint.
pub struct LuisClient {
    client: Client,
    settings: LuisSettings,
    retry: RetryPolicy,
}

impl LuisClient {
    pub fn new(settings: LuisSettings, options: HttpOptions) -> Result<Self> {
        info!("Using LUIS app at {}", settings.app_url());
        Ok(Self {
            client: options.build_client()?,
            settings,
            retry: options.retry,
        })
    }
}

#[async_trait]
impl IntentClassifier for LuisClient {
    async fn classify(&self, utterance: &str) -> Result<ClassifiedMessage> {
        let url = self.settings.app_url();
        let response = send_with_retry(SERVICE, self.retry, || {
            self.client.get(&url).query(&[
                ("subscription-key", self.settings.api_key.as_str()),
                ("q", utterance),
            ])
        })
        .await?;

        let body: LuisResponse = decode_json(SERVICE, response).await?;
        let message = body.into_classified(utterance);
        debug!(
            "Classified {:?} as {} with {} entities",
            utterance,
            message.intent.label(),
            message.entities.len()
        );
        Ok(message)
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct LuisEntity {
    entity: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    resolution: Option<Value>,
}

impl LuisResponse {
    fn into_classified(self, utterance: &str) -> ClassifiedMessage {
        let (intent, score) = match self.top_scoring_intent {
            Some(top) => (Intent::from_label(&top.intent), top.score),
            None => (Intent::None, None),
        };

        ClassifiedMessage {
            query: self.query.unwrap_or_else(|| utterance.to_string()),
            intent,
            score,
            entities: self.entities.into_iter().map(LuisEntity::into_entity).collect(),
        }
    }
}

impl LuisEntity {
    fn into_entity(self) -> Entity {
        let resolution = self.resolution.as_ref().map(parse_resolution);
        Entity {
            kind: self.kind,
            text: self.entity,
            resolution,
        }
    }
}

/// Pull `date`/`value` out of either resolution shape LUIS emits:
/// flat (`{"date": "2001-XX-XX"}`) or datetimeV2 (`{"values": [{"value": ..}]}`).
fn parse_resolution(raw: &Value) -> Resolution {
    let as_string = |v: &Value| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    let first_value = raw
        .get("values")
        .and_then(Value::as_array)
        .and_then(|values| values.first());

    Resolution {
        date: raw
            .get("date")
            .and_then(as_string)
            .or_else(|| first_value.and_then(|v| v.get("value")).and_then(as_string)),
        value: raw.get("value").and_then(as_string),
    }
}
