//! Slot-filling flow for the "Movie" intent.
//!
//! ```text
//! ExtractEntities -> EnsureYear --(year known)--> Fetch -> End
//!                        |                          ^
//!                        +--(prompt, suspend)-------+  resumed by resume_year
//! ```

use clients::ClassifiedMessage;
use tracing::{debug, error, info};

use crate::entities::{extract_entities, year_from_reply};
use crate::flows::Services;
use crate::prompts;
use crate::query::build_query;
use crate::reply::OutboundMessage;
use crate::state::{DialogState, PendingPrompt};

/// Start a movie dialog from a classified message.
pub async fn start(
    services: &Services,
    message: &ClassifiedMessage,
    outbox: &mut Vec<OutboundMessage>,
) -> Option<PendingPrompt> {
    let state = extract_entities(message);
    debug!("Movie slots after extraction: {:?}", state);
    ensure_year(services, state, outbox).await
}

/// Prompt for a year if none is known, otherwise go straight to the lookup.
async fn ensure_year(
    services: &Services,
    state: DialogState,
    outbox: &mut Vec<OutboundMessage>,
) -> Option<PendingPrompt> {
    if state.year.is_none() {
        outbox.push(OutboundMessage::text(prompts::YEAR_PROMPT));
        return Some(PendingPrompt::Year(state));
    }
    fetch(services, &state, outbox).await;
    None
}

/// Resume after the year prompt. A reply without four digits leaves the year unset.
pub async fn resume_year(
    services: &Services,
    mut state: DialogState,
    reply: &str,
    outbox: &mut Vec<OutboundMessage>,
) {
    state.year = year_from_reply(reply);
    debug!("Year reply {:?} parsed as {:?}", reply, state.year);
    fetch(services, &state, outbox).await;
}

/// Query the catalog and present the results. Ends the dialog either way.
pub async fn fetch(services: &Services, state: &DialogState, outbox: &mut Vec<OutboundMessage>) {
    outbox.push(OutboundMessage::Typing);

    let query = build_query(state);
    info!("Looking up movies: {:?}", query);

    match services.catalog.discover(&query).await {
        Ok(result) => {
            let presentation = services.presenter.present(&result.results, state.number);
            info!(
                "Presenting {} of {} movies",
                presentation.cards.len(),
                result.results.len()
            );
            if let Some(notice) = presentation.notice {
                outbox.push(OutboundMessage::Text(notice));
            }
            outbox.push(OutboundMessage::Carousel(presentation.cards));
        }
        Err(e) => {
            error!("Catalog lookup failed: {}", e);
            outbox.push(OutboundMessage::text(prompts::CATALOG_APOLOGY));
        }
    }
}
