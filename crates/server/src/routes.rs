//! HTTP surface: the bot webhook and a liveness probe.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::activity::{Activity, WebhookResponse};
use crate::orchestrator::BotOrchestrator;
use crate::store::{CONVERSATION_IDLE_TTL, IDLE_SWEEP_INTERVAL};

pub const MESSAGES_PATH: &str = "/api/messages";
pub const HEALTH_PATH: &str = "/health";

pub fn build_router(bot: Arc<BotOrchestrator>) -> Router {
    Router::new()
        .route(MESSAGES_PATH, post(messages))
        .route(HEALTH_PATH, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(bot)
}

/// POST /api/messages
///
/// Replies are returned in the response body, which a Bot Framework channel
/// only delivers when the activity's `deliveryMode` is `expectReplies`.
/// Malformed bodies are rejected by the `Json` extractor before the bot sees them.
async fn messages(
    State(bot): State<Arc<BotOrchestrator>>,
    Json(activity): Json<Activity>,
) -> Json<WebhookResponse> {
    if activity.is_message() && !activity.expects_replies() {
        debug!(
            "Activity in conversation {} does not request expectReplies; channel may drop the replies",
            activity.conversation.id
        );
    }
    let activities = bot.handle_activity(&activity).await;
    Json(WebhookResponse { activities })
}

async fn health() -> &'static str {
    "ok"
}

/// Serve until Ctrl+C
pub async fn run_server(bot: Arc<BotOrchestrator>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("MovieBot listening on http://{}{}", listener.local_addr()?, MESSAGES_PATH);

    let sweeper = tokio::spawn(sweep_idle_conversations(bot.clone()));
    let served = axum::serve(listener, build_router(bot))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served.context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn sweep_idle_conversations(bot: Arc<BotOrchestrator>) {
    let mut ticker = tokio::time::interval(IDLE_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        let removed = bot.store().prune_idle(CONVERSATION_IDLE_TTL).await;
        if removed > 0 {
            info!("Dropped {} idle conversations", removed);
        } else {
            debug!("No idle conversations to drop");
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
