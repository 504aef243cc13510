//! Small talk for the "Hello" intent.
//!
//! Asks for the user's name once, then how they are. A low sentiment score on
//! the answer gets a comedy recommendation.

use catalog::Genre;
use tracing::{debug, info, warn};

use crate::flows::{Services, movie};
use crate::prompts;
use crate::reply::OutboundMessage;
use crate::state::{ConversationState, DialogState, PendingPrompt};

/// Scores above this count as a good mood
pub const GOOD_MOOD_THRESHOLD: f64 = 0.6;

/// Start the greeting. Always suspends: on the name prompt or on the mood prompt.
pub fn start(state: &ConversationState, outbox: &mut Vec<OutboundMessage>) -> PendingPrompt {
    match state.name() {
        Some(name) => ask_mood(name, outbox),
        None => {
            outbox.push(OutboundMessage::text(prompts::NAME_PROMPT));
            PendingPrompt::Name
        }
    }
}

fn ask_mood(name: &str, outbox: &mut Vec<OutboundMessage>) -> PendingPrompt {
    outbox.push(OutboundMessage::Text(prompts::mood_prompt(name)));
    PendingPrompt::Mood
}

/// Resume after the name prompt. A blank answer asks again.
pub fn resume_name(
    state: &mut ConversationState,
    reply: &str,
    outbox: &mut Vec<OutboundMessage>,
) -> PendingPrompt {
    let name = reply.trim();
    if name.is_empty() {
        outbox.push(OutboundMessage::text(prompts::NAME_PROMPT));
        return PendingPrompt::Name;
    }

    state.remember_name(name);
    info!("Learned user name");
    let name = state.name().unwrap_or(name).to_string();
    ask_mood(&name, outbox)
}

/// Resume after "how are you?": score the answer and react.
///
/// The closing reminder is sent even when the sentiment call fails.
pub async fn resume_mood(services: &Services, reply: &str, outbox: &mut Vec<OutboundMessage>) {
    match services.sentiment.score(reply).await {
        Ok(score) if score > GOOD_MOOD_THRESHOLD => {
            debug!("Mood score {:.2}, good", score);
            outbox.push(OutboundMessage::text(prompts::GOOD_MOOD));
        }
        Ok(score) => {
            debug!("Mood score {:.2}, recommending a comedy", score);
            outbox.push(OutboundMessage::text(prompts::CONSOLATION));
            let seeded = DialogState::seeded_with_genre(Genre::Comedy.id());
            movie::fetch(services, &seeded, outbox).await;
        }
        Err(e) => {
            warn!("Sentiment scoring failed, skipping mood reply: {}", e);
        }
    }
    outbox.push(OutboundMessage::text(prompts::CLOSING));
}
