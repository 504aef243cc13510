//! Conversation and dialog state.
//!
//! A [`Conversation`] is the owned record for one chat: the long-lived
//! [`ConversationState`] plus, when the last turn ended on a question, the
//! [`PendingPrompt`] the next message answers.

use catalog::{GenreId, SortPreference};

/// Per-user fields that persist across turns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    name: Option<String>,
}

impl ConversationState {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Store the user's name. The first name given sticks; returns `false`
    /// if a name was already known.
    pub fn remember_name(&mut self, name: impl Into<String>) -> bool {
        if self.name.is_some() {
            return false;
        }
        self.name = Some(name.into());
        true
    }
}

/// Slots of one "Movie" dialog. Lives only until the dialog ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogState {
    pub genre: Option<GenreId>,
    pub sort: Option<SortPreference>,
    /// Four-digit release year
    pub year: Option<String>,
    /// How many movies were asked for
    pub number: Option<u32>,
}

impl DialogState {
    /// Dialog state for the "cheer up" recommendation: comedy, nothing else
    pub fn seeded_with_genre(genre: GenreId) -> Self {
        Self {
            genre: Some(genre),
            ..Self::default()
        }
    }
}

/// A piece of information a suspended flow is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Name,
    Mood,
    Year,
}

/// What the bot asked at the end of the previous turn.
///
/// The next user message resumes the matching flow instead of being
/// classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPrompt {
    /// Greeting flow, nested name capture
    Name,
    /// Greeting flow, waiting for "how are you?" answer
    Mood,
    /// Movie flow, waiting for a release year; carries the slots gathered so far
    Year(DialogState),
}

impl PendingPrompt {
    /// Slots the next message is expected to fill
    pub fn pending_slots(&self) -> &'static [Slot] {
        match self {
            PendingPrompt::Name => &[Slot::Name],
            PendingPrompt::Mood => &[Slot::Mood],
            PendingPrompt::Year(_) => &[Slot::Year],
        }
    }
}

/// Everything the bot keeps for one conversation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub state: ConversationState,
    pub pending: Option<PendingPrompt>,
}
