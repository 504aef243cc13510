//! Static genre table and fuzzy genre lookup.
//!
//! The classifier hands us whatever span the user typed ("funny", "horror
//! movies", "sci fi"), so lookups go through [`best_match`], which scores every
//! known name and returns the closest one above a threshold.
//!
//! ## Matching
//! 1. Colloquial aliases ("funny", "scary", ...) resolve directly
//! 2. Containment scoring: how much of the name is covered by the text
//! 3. Jaro-Winkler similarity (via `strsim`) for typos like "comdy"

use crate::types::GenreId;

// =============================================================================
// Genre Enum
// =============================================================================

/// Genres the bot can filter on, with their catalog ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Documentary,
    Drama,
    Horror,
    Mystery,
    Romance,
    Music,
    Thriller,
    War,
    Western,
    SciFi,
    Crime,
}

impl Genre {
    /// Every genre, in table order
    pub const ALL: [Genre; 15] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Documentary,
        Genre::Drama,
        Genre::Horror,
        Genre::Mystery,
        Genre::Romance,
        Genre::Music,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
        Genre::SciFi,
        Genre::Crime,
    ];

    /// Catalog id used in `with_genres`
    pub fn id(self) -> GenreId {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => 16,
            Genre::Comedy => 35,
            Genre::Documentary => 99,
            Genre::Drama => 18,
            Genre::Horror => 27,
            Genre::Mystery => 9648,
            Genre::Romance => 10749,
            Genre::Music => 10402,
            Genre::Thriller => 53,
            Genre::War => 10752,
            Genre::Western => 37,
            Genre::SciFi => 878,
            Genre::Crime => 80,
        }
    }

    /// Lowercase display name, also the string the matcher compares against
    pub fn name(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Adventure => "adventure",
            Genre::Animation => "animation",
            Genre::Comedy => "comedy",
            Genre::Documentary => "documentary",
            Genre::Drama => "drama",
            Genre::Horror => "horror",
            Genre::Mystery => "mystery",
            Genre::Romance => "romance",
            Genre::Music => "music",
            Genre::Thriller => "thriller",
            Genre::War => "war",
            Genre::Western => "western",
            Genre::SciFi => "sci-fi",
            Genre::Crime => "crime",
        }
    }

    /// Exact (case-insensitive) lookup by name
    pub fn from_name(name: &str) -> Option<Genre> {
        let name = name.trim().to_lowercase();
        Genre::ALL.into_iter().find(|genre| genre.name() == name)
    }
}

// =============================================================================
// Match Candidates
// =============================================================================

/// Name of the sentinel entry. It can win a match but never filters results.
pub const QUIT_SENTINEL: &str = "(quit)";

/// A candidate the matcher can return: a real genre or the quit sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreChoice {
    Genre(Genre),
    Quit,
}

impl GenreChoice {
    pub fn name(self) -> &'static str {
        match self {
            GenreChoice::Genre(genre) => genre.name(),
            GenreChoice::Quit => QUIT_SENTINEL,
        }
    }

    /// Table id; the sentinel maps to 0
    pub fn id(self) -> GenreId {
        match self {
            GenreChoice::Genre(genre) => genre.id(),
            GenreChoice::Quit => 0,
        }
    }

    /// The genre to filter on, `None` for the sentinel
    pub fn genre(self) -> Option<Genre> {
        match self {
            GenreChoice::Genre(genre) => Some(genre),
            GenreChoice::Quit => None,
        }
    }
}

/// All match candidates: the fifteen genres followed by the sentinel
pub fn choices() -> impl Iterator<Item = GenreChoice> {
    Genre::ALL
        .into_iter()
        .map(GenreChoice::Genre)
        .chain(std::iter::once(GenreChoice::Quit))
}

/// Best candidate for a piece of text, with its score in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreMatch {
    pub choice: GenreChoice,
    pub score: f64,
}

// =============================================================================
// Fuzzy Lookup
// =============================================================================

/// Containment scores must exceed this to count as a match
pub const CONTAINMENT_THRESHOLD: f64 = 0.6;

/// Jaro-Winkler similarity must reach this to count as a match
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Colloquial words the classifier tags as a genre
const ALIASES: &[(&str, Genre)] = &[
    ("funny", Genre::Comedy),
    ("hilarious", Genre::Comedy),
    ("laugh", Genre::Comedy),
    ("scary", Genre::Horror),
    ("spooky", Genre::Horror),
    ("science fiction", Genre::SciFi),
    ("scifi", Genre::SciFi),
    ("space", Genre::SciFi),
    ("cartoon", Genre::Animation),
    ("cartoons", Genre::Animation),
    ("animated", Genre::Animation),
    ("anime", Genre::Animation),
    ("musical", Genre::Music),
    ("musicals", Genre::Music),
    ("romantic", Genre::Romance),
    ("romcom", Genre::Romance),
    ("love story", Genre::Romance),
    ("documentaries", Genre::Documentary),
    ("cowboy", Genre::Western),
    ("suspense", Genre::Thriller),
    ("detective", Genre::Mystery),
    ("whodunit", Genre::Mystery),
    ("gangster", Genre::Crime),
    ("heist", Genre::Crime),
    ("military", Genre::War),
];

/// Find the closest known genre name for `text`.
///
/// Returns `None` when nothing scores above the thresholds. A returned match
/// may be the [`GenreChoice::Quit`] sentinel; use [`resolve_genre`] to get a
/// filterable genre.
pub fn best_match(text: &str) -> Option<GenreMatch> {
    let utterance = text.trim().to_lowercase();
    if utterance.is_empty() {
        return None;
    }

    if let Some(genre) = alias_for(&utterance) {
        return Some(GenreMatch {
            choice: GenreChoice::Genre(genre),
            score: 1.0,
        });
    }

    let mut best: Option<GenreMatch> = None;
    for choice in choices() {
        let Some(score) = score_choice(&utterance, choice.name()) else {
            continue;
        };
        if best.is_none_or(|current| score > current.score) {
            best = Some(GenreMatch { choice, score });
        }
    }
    best
}

/// Fuzzy lookup that drops the sentinel: the genre to filter on, if any
pub fn resolve_genre(text: &str) -> Option<Genre> {
    best_match(text).and_then(|m| m.choice.genre())
}

fn alias_for(utterance: &str) -> Option<Genre> {
    let lookup = |word: &str| {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == word)
            .map(|(_, genre)| *genre)
    };

    lookup(utterance).or_else(|| utterance.split_whitespace().find_map(lookup))
}

/// Score one candidate name, `None` if it does not clear its threshold.
fn score_choice(utterance: &str, choice: &str) -> Option<f64> {
    let containment = containment_score(utterance, choice);
    if containment > CONTAINMENT_THRESHOLD {
        return Some(containment);
    }

    let similarity = strsim::jaro_winkler(utterance, choice);
    (similarity >= SIMILARITY_THRESHOLD).then_some(similarity)
}

/// How much of `choice` the utterance covers.
///
/// - choice contains the whole utterance: `len(utterance) / len(choice)`
/// - utterance contains the whole choice: `0.5 + len(choice) / len(utterance)`, capped at 0.9
/// - otherwise: characters of utterance tokens found in the choice, over `len(choice)`
fn containment_score(utterance: &str, choice: &str) -> f64 {
    let utterance_len = utterance.chars().count() as f64;
    let choice_len = choice.chars().count() as f64;

    if choice.contains(utterance) {
        utterance_len / choice_len
    } else if utterance.contains(choice) {
        (0.5 + choice_len / utterance_len).min(0.9)
    } else {
        let matched: usize = utterance
            .split_whitespace()
            .filter(|token| choice.contains(token))
            .map(|token| token.chars().count())
            .sum();
        matched as f64 / choice_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_match_catalog() {
        assert_eq!(Genre::Comedy.id(), 35);
        assert_eq!(Genre::Mystery.id(), 9648);
        assert_eq!(Genre::SciFi.id(), 878);
        assert_eq!(GenreChoice::Quit.id(), 0);
    }

    #[test]
    fn test_exact_name_matches_with_full_score() {
        let m = best_match("Horror").unwrap();
        assert_eq!(m.choice, GenreChoice::Genre(Genre::Horror));
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_alias_resolves_colloquial_words() {
        assert_eq!(resolve_genre("funny"), Some(Genre::Comedy));
        assert_eq!(resolve_genre("something scary"), Some(Genre::Horror));
        assert_eq!(resolve_genre("science fiction"), Some(Genre::SciFi));
    }

    #[test]
    fn test_utterance_containing_genre_matches() {
        assert_eq!(resolve_genre("horror movies"), Some(Genre::Horror));
        assert_eq!(resolve_genre("a good western"), Some(Genre::Western));
    }

    #[test]
    fn test_split_tokens_match_hyphenated_name() {
        assert_eq!(resolve_genre("sci fi"), Some(Genre::SciFi));
    }

    #[test]
    fn test_typos_match_by_similarity() {
        assert_eq!(resolve_genre("comdy"), Some(Genre::Comedy));
        assert_eq!(resolve_genre("thriler"), Some(Genre::Thriller));
    }

    #[test]
    fn test_quit_sentinel_matches_but_never_resolves() {
        let m = best_match("quit").unwrap();
        assert_eq!(m.choice, GenreChoice::Quit);
        assert_eq!(resolve_genre("quit"), None);
    }

    #[test]
    fn test_unrelated_text_has_no_match() {
        assert!(best_match("xyzzy").is_none());
        assert!(best_match("   ").is_none());
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(Genre::from_name(" Drama "), Some(Genre::Drama));
        assert_eq!(Genre::from_name("dram"), None);
    }
}
