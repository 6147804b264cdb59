use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

use crate::core::query_encoder::ParameterSet;
use crate::models::{CatalogStats, HealthReport, MovieDetail, MovieId, MoviePage, Suggestion};
use crate::utils::{CatalogError, CatalogResult};

const USER_AGENT: &str = concat!("kinoteka/", env!("CARGO_PKG_VERSION"));

/// Thin HTTP client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
    health_url: Url,
}

#[derive(Debug, Deserialize)]
struct GenresPayload {
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    stats: CatalogStats,
}

#[derive(Debug, Deserialize)]
struct MoviePayload {
    movie: MovieDetail,
}

#[derive(Debug, Deserialize)]
struct SuggestionsPayload {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

impl CatalogApi {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`. The health
    /// endpoint is served from the server root, one level above a trailing `/api`.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::Configuration(format!(
                "unsupported scheme '{}' in {}",
                parsed.scheme(),
                base_url
            )));
        }

        let root = base_url.strip_suffix("/api").unwrap_or(&base_url);
        let health_url = Url::parse(&format!("{}/health", root))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            health_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> CatalogResult<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    pub async fn get_genres(&self) -> CatalogResult<Vec<String>> {
        let url = self.endpoint("genres")?;
        let payload: GenresPayload = self.get_envelope(url).await?;
        Ok(payload.genres)
    }

    pub async fn get_stats(&self) -> CatalogResult<CatalogStats> {
        let url = self.endpoint("stats")?;
        let payload: StatsPayload = self.get_envelope(url).await?;
        Ok(payload.stats)
    }

    pub async fn list_movies(&self, params: &ParameterSet) -> CatalogResult<MoviePage> {
        let mut url = self.endpoint("movies")?;
        url.set_query(Some(&params.to_query_string()));
        self.get_envelope(url).await
    }

    pub async fn get_movie(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        let url = self.endpoint(&format!("movies/{}", id))?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!("Movie {} not found", id);
            return Err(CatalogError::NotFound(id));
        }

        let payload: MoviePayload = Self::parse_envelope(response).await?;
        Ok(payload.movie)
    }

    pub async fn search_suggestions(&self, query: &str) -> CatalogResult<Vec<Suggestion>> {
        let mut url = self.endpoint("search/suggestions")?;
        url.query_pairs_mut().append_pair("q", query);
        let payload: SuggestionsPayload = self.get_envelope(url).await?;
        Ok(payload.suggestions)
    }

    /// The health payload has no `success` flag; an unhealthy server still
    /// answers with a report, only transport failures are errors.
    pub async fn health(&self) -> CatalogResult<HealthReport> {
        debug!("GET {}", self.health_url);
        let response = self.client.get(self.health_url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                CatalogError::Malformed(e.to_string())
            } else {
                CatalogError::Api(format!("health check returned {}", status))
            }
        })
    }

    async fn get_envelope<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::parse_envelope(response).await
    }

    /// Unwrap a `{ success, error?, ...payload }` response.
    ///
    /// The server reports failures as JSON even on 5xx, so the body is inspected
    /// before the status code.
    async fn parse_envelope<T: DeserializeOwned>(response: reqwest::Response) -> CatalogResult<T> {
        let status = response.status();
        let body = response.text().await?;
        unwrap_envelope(status, &body)
    }
}

pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &str,
) -> CatalogResult<T> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if status.is_success() => {
            error!("Failed to parse catalog response: {}", e);
            return Err(CatalogError::Malformed(e.to_string()));
        }
        Err(_) => {
            error!("Catalog request failed with status {}", status);
            return Err(CatalogError::Api(format!("server returned {}", status)));
        }
    };

    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("request was not successful ({})", status));
        error!("Catalog API reported failure: {}", message);
        return Err(CatalogError::Api(message));
    }

    serde_json::from_value(value).map_err(|e| {
        error!("Unexpected catalog payload: {}", e);
        CatalogError::Malformed(e.to_string())
    })
}
