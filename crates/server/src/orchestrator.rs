//! # Bot Orchestrator
//!
//! Ties the webhook to the dialog engine:
//! 1. Pick the conversation record for the activity
//! 2. Lock it for the duration of the turn
//! 3. Run the turn through the dialog engine
//! 4. Convert the outbound messages into reply activities

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clients::{HttpOptions, LuisClient, TextAnalyticsClient, TmdbClient};
use dialog::{DialogEngine, OutboundMessage, Services};
use tracing::{debug, info};

use crate::activity::{Activity, ReplyActivity};
use crate::config::BotConfig;
use crate::store::ConversationStore;

/// Shared entry point for every inbound message
pub struct BotOrchestrator {
    engine: DialogEngine,
    store: ConversationStore,
}

impl BotOrchestrator {
    pub fn new(services: Services) -> Self {
        Self {
            engine: DialogEngine::new(services),
            store: ConversationStore::new(),
        }
    }

    /// Build an orchestrator wired to the real services
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let options = HttpOptions::with_timeout(config.http_timeout);

        let classifier = LuisClient::new(config.luis.clone(), options)
            .context("Failed to create LUIS client")?;
        let catalog = TmdbClient::new(config.tmdb.clone(), options)
            .context("Failed to create TMDb client")?;
        let sentiment = TextAnalyticsClient::new(config.sentiment.clone(), options)
            .context("Failed to create sentiment client")?;

        Ok(Self::new(Services::new(
            Arc::new(classifier),
            Arc::new(catalog),
            Arc::new(sentiment),
        )))
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Handle one webhook activity and return the replies in send order.
    ///
    /// Non-message activities (conversation updates, typing, ...) get no reply.
    pub async fn handle_activity(&self, activity: &Activity) -> Vec<ReplyActivity> {
        if !activity.is_message() {
            debug!(
                "Ignoring {} activity in conversation {}",
                activity.kind, activity.conversation.id
            );
            return Vec::new();
        }

        let text = activity.text.as_deref().unwrap_or_default();
        self.handle_message(&activity.conversation.id, text)
            .await
            .iter()
            .map(|message| ReplyActivity::from_outbound(message, activity))
            .collect()
    }

    /// Run one user message of `conversation_id` through the dialog engine.
    pub async fn handle_message(&self, conversation_id: &str, text: &str) -> Vec<OutboundMessage> {
        let start_time = Instant::now();

        let slot = self.store.checkout(conversation_id).await;
        let mut conversation = slot.lock().await;
        let replies = self.engine.handle_turn(&mut conversation, text).await;

        info!(
            "Turn for conversation {} produced {} messages in {:.2?}",
            conversation_id,
            replies.len(),
            start_time.elapsed()
        );
        replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{CatalogQuery, CatalogResult, MovieRecord};
    use clients::{
        ClassifiedMessage, Entity, Intent, IntentClassifier, MovieCatalog, SentimentScorer,
        entity_types,
    };
    use dialog::{MoviePresenter, PendingPrompt, prompts};

    // ============================================================================
    // Mock Services
    // ============================================================================

    /// Keyword classifier: "hi" is Hello, anything mentioning "movie" is Movie
    struct KeywordClassifier;

    #[async_trait]
    impl IntentClassifier for KeywordClassifier {
        async fn classify(&self, utterance: &str) -> clients::Result<ClassifiedMessage> {
            let lower = utterance.to_lowercase();
            let message = if lower == "hi" {
                ClassifiedMessage::new(utterance, Intent::Hello, vec![])
            } else if lower.contains("movie") {
                let mut entities = vec![];
                if lower.contains("funny") {
                    entities.push(Entity::new(entity_types::GENRE, "funny"));
                }
                ClassifiedMessage::new(utterance, Intent::Movie, entities)
            } else {
                ClassifiedMessage::new(utterance, Intent::None, vec![])
            };
            Ok(message)
        }
    }

    struct StaticCatalog;

    #[async_trait]
    impl MovieCatalog for StaticCatalog {
        async fn discover(&self, _query: &CatalogQuery) -> clients::Result<CatalogResult> {
            Ok(CatalogResult {
                results: (1..=10)
                    .map(|id| MovieRecord {
                        id,
                        title: format!("Movie {}", id),
                        overview: String::new(),
                        poster_path: Some(format!("/{}.jpg", id)),
                    })
                    .collect(),
            })
        }
    }

    struct StaticSentiment(f64);

    #[async_trait]
    impl SentimentScorer for StaticSentiment {
        async fn score(&self, _text: &str) -> clients::Result<f64> {
            Ok(self.0)
        }
    }

    fn build_test_orchestrator(mood: f64) -> BotOrchestrator {
        let services = Services::new(
            Arc::new(KeywordClassifier),
            Arc::new(StaticCatalog),
            Arc::new(StaticSentiment(mood)),
        )
        .with_presenter(MoviePresenter::with_seed(5));
        BotOrchestrator::new(services)
    }

    fn message_activity(conversation: &str, text: &str) -> Activity {
        serde_json::from_value(serde_json::json!({
            "type": "message",
            "id": "m1",
            "from": {"id": "user"},
            "recipient": {"id": "bot"},
            "conversation": {"id": conversation},
            "text": text
        }))
        .unwrap()
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let bot = build_test_orchestrator(0.9);

        bot.handle_message("alice", "hi").await;
        bot.handle_message("alice", "Alice").await;
        bot.handle_message("bob", "hi").await;

        let alice = bot.store().snapshot("alice").await.unwrap();
        let bob = bot.store().snapshot("bob").await.unwrap();

        assert_eq!(alice.state.name(), Some("Alice"));
        assert_eq!(alice.pending, Some(PendingPrompt::Mood));
        assert!(bob.state.name().is_none());
        assert_eq!(bob.pending, Some(PendingPrompt::Name));
    }

    #[tokio::test]
    async fn test_name_survives_across_dialogs() {
        let bot = build_test_orchestrator(0.9);

        bot.handle_message("c", "hi").await;
        bot.handle_message("c", "Robin").await;
        bot.handle_message("c", "fine").await;

        let replies = bot.handle_message("c", "hi").await;
        assert_eq!(replies, vec![OutboundMessage::text("Hi Robin, How are you?")]);
    }

    #[tokio::test]
    async fn test_movie_activity_produces_typing_and_carousel() {
        let bot = build_test_orchestrator(0.9);

        let prompt = bot.handle_activity(&message_activity("c", "a funny movie")).await;
        assert_eq!(prompt.len(), 1);
        assert_eq!(prompt[0].text.as_deref(), Some(prompts::YEAR_PROMPT));

        let replies = bot.handle_activity(&message_activity("c", "2001")).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].kind, "typing");
        assert_eq!(replies[1].attachment_layout.as_deref(), Some("carousel"));
        assert_eq!(replies[1].attachments.len(), 1);
        assert_eq!(replies[1].reply_to_id.as_deref(), Some("m1"));
    }

    #[tokio::test]
    async fn test_non_message_activity_is_ignored() {
        let bot = build_test_orchestrator(0.9);
        let mut activity = message_activity("c", "");
        activity.kind = "conversationUpdate".to_string();

        assert!(bot.handle_activity(&activity).await.is_empty());
        assert!(bot.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_turns_in_one_conversation_are_serialized() {
        let bot = Arc::new(build_test_orchestrator(0.9));
        bot.handle_message("c", "hi").await;

        // Both answers race for the name prompt; exactly one can consume it
        let (a, b) = tokio::join!(
            bot.handle_message("c", "First"),
            bot.handle_message("c", "Second"),
        );

        let name_answers = [&a, &b]
            .iter()
            .filter(|replies| {
                replies
                    .iter()
                    .any(|m| m.as_text().is_some_and(|t| t.ends_with("How are you?")))
            })
            .count();
        assert_eq!(name_answers, 1);

        let conversation = bot.store().snapshot("c").await.unwrap();
        assert!(conversation.state.name().is_some());
        assert!(conversation.pending.is_none(), "Second turn answered the mood prompt");
    }
}
