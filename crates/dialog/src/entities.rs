//! Turning classifier entities and free-text replies into slot values.

use std::sync::LazyLock;

use catalog::{Genre, SortPreference, resolve_genre};
use chrono::{Datelike, NaiveDate};
use clients::{ClassifiedMessage, entity_types};
use regex::Regex;
use tracing::debug;

use crate::state::DialogState;

/// First run of exactly four digits
static YEAR_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").unwrap());

/// Leading year of a resolved date such as `2001-XX-XX`
static LEADING_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})(?:-|$)").unwrap());

/// Fill a fresh [`DialogState`] from the entities of a "Movie" message.
///
/// Missing or unrecognized entities leave their slot unset. Sort is always
/// set: popularity when the model tagged a popularity request, rating otherwise.
pub fn extract_entities(message: &ClassifiedMessage) -> DialogState {
    let mut state = DialogState::default();

    if let Some(entity) = message.find_entity(entity_types::GENRE) {
        state.genre = resolve_genre(&entity.text).map(Genre::id);
        debug!("Genre entity {:?} resolved to {:?}", entity.text, state.genre);
    }

    if let Some(entity) = message.find_entity(entity_types::DATE) {
        state.year = entity
            .resolution
            .as_ref()
            .and_then(|r| r.date.as_deref())
            .and_then(year_from_date)
            .or_else(|| year_from_reply(&entity.text));
        debug!("Date entity {:?} resolved to year {:?}", entity.text, state.year);
    }

    if let Some(entity) = message.find_entity(entity_types::NUMBER) {
        let converted = words_to_number(&entity.text).or_else(|| {
            entity
                .resolution
                .as_ref()
                .and_then(|r| r.value.as_deref())
                .and_then(|v| v.trim().parse().ok())
        });
        state.number = converted.and_then(|n| discard_year_echo(n, state.year.as_deref()));
        debug!("Number entity {:?} resolved to {:?}", entity.text, state.number);
    }

    state.sort = Some(if message.find_entity(entity_types::SORT_POPULARITY).is_some() {
        SortPreference::Popularity
    } else {
        SortPreference::Rating
    });

    state
}

/// Drop a count that is really the year read twice ("movies from 1999"
/// tagged both as a date and as a number). Zero is dropped as well.
fn discard_year_echo(number: u32, year: Option<&str>) -> Option<u32> {
    if number == 0 {
        return None;
    }
    match year.and_then(|y| y.parse::<u32>().ok()) {
        Some(year) if year == number => None,
        _ => Some(number),
    }
}

/// Calendar year of a resolved date: `2016-10-12`, `2001-XX-XX`, `1994`.
pub fn year_from_date(date: &str) -> Option<String> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(format!("{:04}", parsed.year()));
    }
    LEADING_YEAR_RE
        .captures(date)
        .map(|caps| caps[1].to_string())
}

/// Year typed in answer to the year prompt: the first standalone run of four digits.
///
/// `"Released in 1994 I think"` gives `Some("1994")`, `"not sure"` gives `None`.
pub fn year_from_reply(reply: &str) -> Option<String> {
    YEAR_RUN_RE
        .captures(reply)
        .map(|caps| caps[1].to_string())
}

/// Convert a spoken count ("three", "twenty-one", "12") to a number.
///
/// Returns `None` for anything that is not a number phrase.
pub fn words_to_number(text: &str) -> Option<u32> {
    let text = text.trim().to_lowercase();
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }

    let mut total: u32 = 0;
    let mut current: u32 = 0;
    let mut seen_number = false;

    for word in text.split(|c: char| c.is_whitespace() || c == '-').filter(|w| !w.is_empty()) {
        match word {
            "and" | "a" => continue,
            "hundred" => {
                current = current.max(1).checked_mul(100)?;
            }
            "thousand" => {
                total = total.checked_add(current.max(1).checked_mul(1000)?)?;
                current = 0;
            }
            _ => {
                let value = small_number(word).or_else(|| word.parse().ok())?;
                current = current.checked_add(value)?;
            }
        }
        seen_number = true;
    }

    seen_number.then(|| total.saturating_add(current))
}

fn small_number(word: &str) -> Option<u32> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}
