//! TMDb catalog client (`discover/movie`).

use async_trait::async_trait;
use catalog::{CatalogQuery, CatalogResult};
use reqwest::Client;
use tracing::{debug, info};

use crate::http::{decode_json, send_with_retry, HttpOptions, RetryPolicy};
use crate::traits::MovieCatalog;
use crate::Result;

const SERVICE: &str = "TMDb";

/// Public API root
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub base_url: String,
    pub api_key: String,
}

impl TmdbSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    fn discover_url(&self) -> String {
        format!("{}/discover/movie", self.base_url.trim_end_matches('/'))
    }
}

/// Client for the movie catalog
pub struct TmdbClient {
    client: Client,
    settings: TmdbSettings,
    retry: RetryPolicy,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings, options: HttpOptions) -> Result<Self> {
        info!("Using movie catalog at {}", settings.base_url);
        Ok(Self {
            client: options.build_client()?,
            settings,
            retry: options.retry,
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn discover(&self, query: &CatalogQuery) -> Result<CatalogResult> {
        let url = self.settings.discover_url();
        let params = query.to_params();
        debug!("Discovering movies with {:?}", params);

        let response = send_with_retry(SERVICE, self.retry, || {
            self.client
                .get(&url)
                .query(&[("api_key", self.settings.api_key.as_str())])
                .query(&params)
        })
        .await?;

        let result: CatalogResult = decode_json(SERVICE, response).await?;
        info!("Catalog returned {} movies", result.results.len());
        Ok(result)
    }
}
