//! Builds the catalog query from the slots of a movie dialog.

use catalog::CatalogQuery;

use crate::state::DialogState;

/// Map dialog slots onto catalog filters.
///
/// Only slots that are set become filters. Values are passed through as-is;
/// the catalog rejects anything malformed.
pub fn build_query(state: &DialogState) -> CatalogQuery {
    CatalogQuery {
        with_genres: state.genre,
        sort_by: state.sort.map(|sort| sort.sort_key().to_string()),
        primary_release_year: state.year.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Genre, SortPreference};

    #[test]
    fn test_all_slots_set() {
        let state = DialogState {
            genre: Some(Genre::Comedy.id()),
            sort: Some(SortPreference::Rating),
            year: Some("2001".to_string()),
            number: Some(3),
        };

        let query = build_query(&state);

        assert_eq!(query.with_genres, Some(35));
        assert_eq!(query.sort_by.as_deref(), Some("vote_average.desc"));
        assert_eq!(query.primary_release_year.as_deref(), Some("2001"));
    }

    #[test]
    fn test_popularity_sort_key() {
        let state = DialogState {
            sort: Some(SortPreference::Popularity),
            ..DialogState::default()
        };

        assert_eq!(build_query(&state).sort_by.as_deref(), Some("popularity.desc"));
    }

    #[test]
    fn test_empty_state_builds_empty_query() {
        assert_eq!(build_query(&DialogState::default()), CatalogQuery::default());
    }
}
