//! Dialog flows for the movie bot.
//!
//! This crate provides:
//! - Dialog and conversation state, including the prompt a turn suspended on
//! - Entity extraction from classifier output and free-text replies
//! - The catalog query builder and the carousel presenter
//! - The "Movie" slot-filling flow and the "Hello" greeting flow
//! - [`DialogEngine`], which routes each user message to the right flow
//!
//! ## Architecture
//! A turn either resumes the flow that asked the last question, or goes to
//! the classifier and is routed by intent:
//! 1. "Hello": greeting flow (name, mood, sentiment)
//! 2. "Movie": extract slots, prompt for a year if missing, look up, present
//! 3. "None": fixed fallback text
//!
//! ## Example Usage
//! ```ignore
//! use dialog::{Conversation, DialogEngine, Services};
//!
//! let engine = DialogEngine::new(Services::new(classifier, catalog, sentiment));
//! let mut conversation = Conversation::default();
//!
//! let replies = engine.handle_turn(&mut conversation, "show me a funny movie").await;
//! ```

pub mod engine;
pub mod entities;
pub mod flows;
pub mod presenter;
pub mod prompts;
pub mod query;
pub mod reply;
pub mod state;

// Re-export main types
pub use engine::DialogEngine;
pub use flows::Services;
pub use presenter::{ActionKind, CardAction, CardImage, MoviePresenter, Presentation, PresentationCard};
pub use query::build_query;
pub use reply::OutboundMessage;
pub use state::{Conversation, ConversationState, DialogState, PendingPrompt, Slot};
