//! Core domain types for the movie catalog.
//!
//! These mirror the subset of the TMDb `discover/movie` contract the bot
//! relies on: the query it sends and the records it reads back.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog identifier of a movie (TMDb movie id)
pub type MovieId = u64;

/// Catalog identifier of a genre (TMDb genre id)
pub type GenreId = u32;

// =============================================================================
// Catalog Constants
// =============================================================================

/// Base URL for poster images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Thumbnail size token inserted between the image base URL and the poster path
pub const POSTER_SIZE: &str = "w185";

/// Base URL of the public movie detail page
pub const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie/";

// =============================================================================
// Results
// =============================================================================

/// A single movie returned by a catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Synopsis. TMDb sends an empty string when it has none.
    #[serde(default)]
    pub overview: String,
    /// Relative poster path such as `/abc.jpg`
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieRecord {
    /// Canonical detail page for this movie
    pub fn detail_url(&self) -> String {
        format!("{}{}", MOVIE_PAGE_BASE_URL, self.id)
    }

    /// Thumbnail URL, only when the record carries a poster path
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}{}", IMAGE_BASE_URL, POSTER_SIZE, path))
    }
}

/// Ordered page of movies from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResult {
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}

// =============================================================================
// Query
// =============================================================================

/// How the user wants results ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPreference {
    Popularity,
    /// Ordered by vote average ("votes" in conversation)
    Rating,
}

impl SortPreference {
    /// The catalog's `sort_by` value for this preference
    pub fn sort_key(self) -> &'static str {
        match self {
            SortPreference::Popularity => "popularity.desc",
            SortPreference::Rating => "vote_average.desc",
        }
    }
}

/// Filter set for one catalog lookup.
///
/// Absent fields are left out of the request entirely; the catalog is
/// trusted to reject malformed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_genres: Option<GenreId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_release_year: Option<String>,
}

impl CatalogQuery {
    /// Query parameters in request order, skipping unset fields
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(genre) = self.with_genres {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(sort) = &self.sort_by {
            params.push(("sort_by", sort.clone()));
        }
        if let Some(year) = &self.primary_release_year {
            params.push(("primary_release_year", year.clone()));
        }
        params
    }
}
