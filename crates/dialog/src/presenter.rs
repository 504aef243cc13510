//! Turns catalog results into a carousel of presentation cards.
//!
//! ## Selection
//! - `number > 10`: the first 10 results, preceded by a truncation notice
//! - `number == 1` (the default): one result at a random index in `[0, 10)`,
//!   so repeated single-movie requests vary
//! - otherwise: the first `number` results
//!
//! The slice is clipped to what the catalog returned; a short or empty
//! carousel is not an error.

use std::ops::Range;
use std::sync::Mutex;

use catalog::MovieRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::prompts;

/// Upper bound on cards per carousel
pub const MAX_MOVIES_TO_SHOW: usize = 10;

/// Count used when the user did not ask for one
pub const DEFAULT_NUMBER: u32 = 1;

const MORE_INFO_TITLE: &str = "Movie Info";
const UNTITLED: &str = "Untitled";

// =============================================================================
// Cards
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenUrl,
    ShowImage,
}

/// A button or tap target on a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub url: String,
    pub tap: CardAction,
}

/// One movie as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationCard {
    pub title: String,
    pub text: String,
    /// Always exactly one "Movie Info" link
    pub buttons: Vec<CardAction>,
    /// Empty when the movie has no poster
    pub images: Vec<CardImage>,
}

impl PresentationCard {
    pub fn from_record(movie: &MovieRecord) -> Self {
        let title = if movie.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            movie.title.clone()
        };

        let images = movie
            .poster_url()
            .map(|url| CardImage {
                tap: CardAction {
                    kind: ActionKind::ShowImage,
                    title: title.clone(),
                    value: url.clone(),
                },
                url,
            })
            .into_iter()
            .collect();

        Self {
            title,
            text: movie.overview.clone(),
            buttons: vec![CardAction {
                kind: ActionKind::OpenUrl,
                title: MORE_INFO_TITLE.to_string(),
                value: movie.detail_url(),
            }],
            images,
        }
    }

    /// The "more info" link target
    pub fn link(&self) -> Option<&str> {
        self.buttons.first().map(|b| b.value.as_str())
    }
}

/// Presenter output: an optional notice, then the carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub notice: Option<String>,
    pub cards: Vec<PresentationCard>,
}

// =============================================================================
// Selection
// =============================================================================

/// Result window for a requested count, and whether the count was clamped.
pub fn select_range<R: Rng + ?Sized>(number: u32, rng: &mut R) -> (Range<usize>, bool) {
    let number = number as usize;
    if number > MAX_MOVIES_TO_SHOW {
        (0..MAX_MOVIES_TO_SHOW, true)
    } else if number <= 1 {
        let start = rng.random_range(0..MAX_MOVIES_TO_SHOW);
        (start..start + 1, false)
    } else {
        (0..number, false)
    }
}

/// Build the presentation for `movies` with an explicit random source.
pub fn present_with_rng<R: Rng + ?Sized>(
    movies: &[MovieRecord],
    number: Option<u32>,
    rng: &mut R,
) -> Presentation {
    let number = number.filter(|n| *n > 0).unwrap_or(DEFAULT_NUMBER);
    let (range, truncated) = select_range(number, rng);

    let start = range.start.min(movies.len());
    let end = range.end.min(movies.len());
    let cards = movies[start..end]
        .iter()
        .map(PresentationCard::from_record)
        .collect();

    Presentation {
        notice: truncated.then(|| prompts::truncation_notice(MAX_MOVIES_TO_SHOW)),
        cards,
    }
}

/// Presenter holding its own random source.
///
/// The lock is only held for the duration of one selection.
pub struct MoviePresenter {
    rng: Mutex<StdRng>,
}

impl MoviePresenter {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic presenter for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn present(&self, movies: &[MovieRecord], number: Option<u32>) -> Presentation {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        present_with_rng(movies, number, &mut *rng)
    }
}

impl Default for MoviePresenter {
    fn default() -> Self {
        Self::new()
    }
}
