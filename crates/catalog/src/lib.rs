//! # Catalog Crate
//!
//! Domain types shared by everything that talks about movies.
//!
//! ## Main Components
//!
//! - **types**: catalog records, the lookup query, sort preference
//! - **genre**: the static genre table and its fuzzy matcher
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{resolve_genre, CatalogQuery, SortPreference};
//!
//! let query = CatalogQuery {
//!     with_genres: resolve_genre("funny").map(|g| g.id()),
//!     sort_by: Some(SortPreference::Rating.sort_key().to_string()),
//!     primary_release_year: Some("2001".to_string()),
//! };
//! ```

// Public modules
pub mod genre;
pub mod types;

// Re-export commonly used types for convenience
pub use genre::{best_match, resolve_genre, Genre, GenreChoice, GenreMatch, QUIT_SENTINEL};
pub use types::{
    // Type aliases
    GenreId,
    MovieId,
    // Core types
    CatalogQuery,
    CatalogResult,
    MovieRecord,
    SortPreference,
    // Constants
    IMAGE_BASE_URL,
    MOVIE_PAGE_BASE_URL,
    POSTER_SIZE,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn record(poster_path: Option<&str>) -> MovieRecord {
        MovieRecord {
            id: 550,
            title: "Fight Club".to_string(),
            overview: "An insomniac office worker...".to_string(),
            poster_path: poster_path.map(str::to_string),
        }
    }

    #[test]
    fn test_detail_and_poster_urls() {
        let movie = record(Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"));

        assert_eq!(movie.detail_url(), "https://www.themoviedb.org/movie/550");
        assert_eq!(
            movie.poster_url().unwrap(),
            "https://image.tmdb.org/t/p/w185/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
    }

    #[test]
    fn test_missing_or_empty_poster_has_no_url() {
        assert!(record(None).poster_url().is_none());
        assert!(record(Some("")).poster_url().is_none());
    }

    #[test]
    fn test_catalog_result_parses_null_poster() {
        let body = r#"{
            "page": 1,
            "results": [
                {"id": 1, "title": "A", "overview": "first", "poster_path": null},
                {"id": 2, "title": "B", "overview": "second", "poster_path": "/b.jpg"}
            ]
        }"#;

        let result: CatalogResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.results.len(), 2);
        assert!(result.results[0].poster_path.is_none());
        assert_eq!(result.results[1].poster_path.as_deref(), Some("/b.jpg"));
    }

    #[test]
    fn test_query_params_skip_unset_fields() {
        let query = CatalogQuery {
            with_genres: Some(Genre::Comedy.id()),
            sort_by: None,
            primary_release_year: Some("2001".to_string()),
        };

        assert_eq!(
            query.to_params(),
            vec![
                ("with_genres", "35".to_string()),
                ("primary_release_year", "2001".to_string()),
            ]
        );
        assert!(CatalogQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(SortPreference::Popularity.sort_key(), "popularity.desc");
        assert_eq!(SortPreference::Rating.sort_key(), "vote_average.desc");
    }
}
