//! Per-turn dispatch: resume a suspended flow or classify and route.

use clients::{ClassifiedMessage, Intent};
use tracing::{info, warn};

use crate::flows::{Services, greeting, movie};
use crate::prompts;
use crate::reply::OutboundMessage;
use crate::state::{Conversation, ConversationState, PendingPrompt};

/// Runs one user message through the dialog flows.
///
/// The engine holds no per-conversation data; callers own the
/// [`Conversation`] and must not run two turns of the same conversation
/// at once.
pub struct DialogEngine {
    services: Services,
}

impl DialogEngine {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Process one user message to completion or to its next prompt.
    pub async fn handle_turn(&self, conversation: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let mut outbox = Vec::new();

        conversation.pending = match conversation.pending.take() {
            Some(prompt) => {
                info!("Resuming flow waiting for {:?}", prompt.pending_slots());
                self.resume(&mut conversation.state, prompt, text, &mut outbox)
                    .await
            }
            None => self.dispatch(&conversation.state, text, &mut outbox).await,
        };

        if let Some(prompt) = &conversation.pending {
            info!("Turn suspended waiting for {:?}", prompt.pending_slots());
        }
        outbox
    }

    async fn resume(
        &self,
        state: &mut ConversationState,
        prompt: PendingPrompt,
        text: &str,
        outbox: &mut Vec<OutboundMessage>,
    ) -> Option<PendingPrompt> {
        match prompt {
            PendingPrompt::Name => Some(greeting::resume_name(state, text, outbox)),
            PendingPrompt::Mood => {
                greeting::resume_mood(&self.services, text, outbox).await;
                None
            }
            PendingPrompt::Year(dialog) => {
                movie::resume_year(&self.services, dialog, text, outbox).await;
                None
            }
        }
    }

    async fn dispatch(
        &self,
        state: &ConversationState,
        text: &str,
        outbox: &mut Vec<OutboundMessage>,
    ) -> Option<PendingPrompt> {
        let message = self.classify(text).await;
        info!("Routing intent {}", message.intent.label());

        match message.intent {
            Intent::Hello => Some(greeting::start(state, outbox)),
            Intent::Movie => movie::start(&self.services, &message, outbox).await,
            Intent::None => {
                outbox.push(OutboundMessage::text(prompts::NOT_UNDERSTOOD));
                None
            }
        }
    }

    /// Classify `text`; blank input and classifier failures become `None`.
    async fn classify(&self, text: &str) -> ClassifiedMessage {
        if text.trim().is_empty() {
            return ClassifiedMessage::new(text, Intent::None, Vec::new());
        }
        match self.services.classifier.classify(text).await {
            Ok(message) => message,
            Err(e) => {
                warn!("Classifier failed, treating message as unrecognized: {}", e);
                ClassifiedMessage::new(text, Intent::None, Vec::new())
            }
        }
    }
}
