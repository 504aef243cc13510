//! In-process conversation records keyed by conversation id.
//!
//! Records live in memory only. Conversations idle longer than
//! [`CONVERSATION_IDLE_TTL`] are dropped by the server's sweeper, which
//! also forgets the user's name.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dialog::Conversation;
use tokio::sync::Mutex;

/// How long an untouched conversation is kept
pub const CONVERSATION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// How often the server sweeps idle conversations
pub const IDLE_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

struct Entry {
    conversation: Arc<Mutex<Conversation>>,
    last_seen: Instant,
}

/// Owned conversation records, one lock per conversation.
///
/// Holding a conversation's lock for the whole turn keeps turns of the same
/// conversation strictly sequential while other conversations proceed.
#[derive(Default)]
pub struct ConversationStore {
    conversations: Mutex<HashMap<String, Entry>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `id`, created empty on first contact
    pub async fn checkout(&self, id: &str) -> Arc<Mutex<Conversation>> {
        let mut conversations = self.conversations.lock().await;
        let entry = conversations.entry(id.to_string()).or_insert_with(|| Entry {
            conversation: Arc::new(Mutex::new(Conversation::default())),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        entry.conversation.clone()
    }

    /// Copy of the current record, if the conversation exists
    pub async fn snapshot(&self, id: &str) -> Option<Conversation> {
        let slot = self
            .conversations
            .lock()
            .await
            .get(id)
            .map(|entry| entry.conversation.clone())?;
        let conversation = slot.lock().await;
        Some(conversation.clone())
    }

    /// Drop conversations untouched for `max_idle`; returns how many were removed
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        self.prune_idle_at(Instant::now(), max_idle).await
    }

    async fn prune_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        let mut conversations = self.conversations.lock().await;
        let before = conversations.len();
        // A record still checked out by a running turn is kept
        conversations.retain(|_, entry| {
            now.duration_since(entry.last_seen) < max_idle
                || Arc::strong_count(&entry.conversation) > 1
        });
        before - conversations.len()
    }

    pub async fn len(&self) -> usize {
        self.conversations.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_checkout_creates_once_per_id() {
        let store = ConversationStore::new();
        assert!(store.is_empty().await);

        let first = store.checkout("a").await;
        first.lock().await.state.remember_name("Ana");

        let again = store.checkout("a").await;
        assert!(Arc::ptr_eq(&first, &again));
        store.checkout("b").await;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.snapshot("a").await.unwrap().state.name(), Some("Ana"));
        assert!(store.snapshot("b").await.unwrap().state.name().is_none());
        assert!(store.snapshot("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_idle_conversations_are_pruned() {
        let store = ConversationStore::new();
        store.checkout("idle").await;
        let in_turn = store.checkout("busy").await;

        // Nothing has been idle long enough yet
        assert_eq!(store.prune_idle(CONVERSATION_IDLE_TTL).await, 0);
        assert_eq!(store.len().await, 2);

        let later = Instant::now() + CONVERSATION_IDLE_TTL * 2;
        assert_eq!(store.prune_idle_at(later, CONVERSATION_IDLE_TTL).await, 1);
        assert!(store.snapshot("idle").await.is_none());
        assert!(store.snapshot("busy").await.is_some());

        drop(in_turn);
        assert_eq!(store.prune_idle_at(later, CONVERSATION_IDLE_TTL).await, 1);
        assert!(store.is_empty().await);
    }
}
