//! Webhook server for the movie bot.
//!
//! This crate contains:
//! - Bot Framework activity wire types
//! - Configuration loading
//! - The per-conversation store
//! - The orchestrator that runs each activity through the dialog engine
//! - The axum router

pub mod activity;
pub mod config;
pub mod orchestrator;
pub mod routes;
pub mod store;

pub use activity::{Activity, ReplyActivity, WebhookResponse};
pub use config::BotConfig;
pub use orchestrator::BotOrchestrator;
pub use routes::{build_router, run_server};
pub use store::ConversationStore;
