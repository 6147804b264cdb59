mod api;


pub use api::CatalogApi;

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use super::traits::CatalogBackend;
use crate::config::ApiConfig;
use crate::core::query_encoder::ParameterSet;
use crate::models::{CatalogStats, HealthReport, MovieDetail, MovieId, MoviePage, Suggestion};
use crate::utils::CatalogResult;

/// [`CatalogBackend`] backed by the catalog's JSON REST API.
#[derive(Debug, Clone)]
pub struct RestBackend {
    api: CatalogApi,
    backend_id: String,
}

impl RestBackend {
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let api = CatalogApi::new(base_url, timeout)?;
        info!("Using catalog API at {}", api.base_url());
        Ok(Self {
            backend_id: format!("rest:{}", api.base_url()),
            api,
        })
    }

    pub fn from_config(config: &ApiConfig) -> CatalogResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl CatalogBackend for RestBackend {
    async fn get_genres(&self) -> CatalogResult<Vec<String>> {
        let mut genres: Vec<String> = self
            .api
            .get_genres()
            .await?
            .into_iter()
            .map(|genre| genre.trim().to_string())
            .filter(|genre| !genre.is_empty())
            .collect();
        genres.sort();
        genres.dedup();
        debug!("Loaded {} genres", genres.len());
        Ok(genres)
    }

    async fn get_stats(&self) -> CatalogResult<CatalogStats> {
        self.api.get_stats().await
    }

    async fn list_movies(&self, params: &ParameterSet) -> CatalogResult<MoviePage> {
        let page = self.api.list_movies(params).await?;
        debug!(
            "Received {} movies (total {}, {} pages)",
            page.movies.len(),
            page.total,
            page.total_pages
        );
        Ok(page)
    }

    async fn get_movie(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        self.api.get_movie(id).await
    }

    async fn search_suggestions(&self, query: &str) -> CatalogResult<Vec<Suggestion>> {
        self.api.search_suggestions(query).await
    }

    async fn health(&self) -> CatalogResult<HealthReport> {
        self.api.health().await
    }

    fn backend_id(&self) -> &str {
        &self.backend_id
    }
}
