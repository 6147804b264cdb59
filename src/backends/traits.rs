use async_trait::async_trait;

use crate::core::query_encoder::ParameterSet;
use crate::models::{CatalogStats, HealthReport, MovieDetail, MovieId, MoviePage, Suggestion};
use crate::utils::CatalogResult;

/// Remote movie catalog.
///
/// Every call reports failures as [`crate::utils::CatalogError`]; responses whose
/// `success` flag is false never reach the caller as data.
#[async_trait]
pub trait CatalogBackend: Send + Sync + std::fmt::Debug {
    /// Sorted, de-duplicated genre names.
    async fn get_genres(&self) -> CatalogResult<Vec<String>>;

    async fn get_stats(&self) -> CatalogResult<CatalogStats>;

    /// One page of movies for an already encoded query.
    async fn list_movies(&self, params: &ParameterSet) -> CatalogResult<MoviePage>;

    async fn get_movie(&self, id: MovieId) -> CatalogResult<MovieDetail>;

    async fn search_suggestions(&self, query: &str) -> CatalogResult<Vec<Suggestion>>;

    async fn health(&self) -> CatalogResult<HealthReport>;

    fn backend_id(&self) -> &str;
}
