//! Classifier output: the intent and entities of one utterance.

use serde::{Deserialize, Serialize};

/// Entity type tags produced by the classifier model
pub mod entity_types {
    pub const GENRE: &str = "genre";
    pub const SORT_POPULARITY: &str = "sort::popularity";
    pub const NUMBER: &str = "builtin.number";
    pub const DATE: &str = "builtin.datetime.date";
}

/// Coarse label assigned to an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Hello,
    Movie,
    None,
}

impl Intent {
    /// Map a model label to an intent. Unknown labels fall back to `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "hello" => Intent::Hello,
            "movie" => Intent::Movie,
            _ => Intent::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intent::Hello => "Hello",
            Intent::Movie => "Movie",
            Intent::None => "None",
        }
    }
}

/// Structured value the classifier attached to an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved date, e.g. `2001-XX-XX` or `2016-10-12`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Resolved scalar value, e.g. `3` for "three"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A typed span of the utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    /// The matched text as it appeared in the utterance
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl Entity {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            resolution: None,
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }
}

/// Intent plus entities for one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMessage {
    pub query: String,
    pub intent: Intent,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl ClassifiedMessage {
    pub fn new(query: impl Into<String>, intent: Intent, entities: Vec<Entity>) -> Self {
        Self {
            query: query.into(),
            intent,
            score: None,
            entities,
        }
    }

    /// First entity of the given type
    pub fn find_entity(&self, kind: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.kind == kind)
    }
}
