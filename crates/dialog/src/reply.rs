//! Messages produced by a turn, independent of the chat transport.

use crate::presenter::PresentationCard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Text(String),
    /// "Bot is typing" indicator
    Typing,
    /// One carousel of cards, possibly empty
    Carousel(Vec<PresentationCard>),
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text(text) => Some(text),
            _ => None,
        }
    }
}
