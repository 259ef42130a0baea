/// TMDB catalog provider
///
/// Wraps the two read-only endpoints the chat pipeline needs:
/// `/discover/movie` for genre-filtered discovery and `/movie/popular` as
/// the no-genre fallback. Both are authenticated with the fixed API key and
/// bounded by the configured request timeout.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogMovie, GenreQuery, SortOrder},
    services::providers::CatalogProvider,
};

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<CatalogMovie>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Query parameters for a discovery request, in the order TMDB documents
    /// them. The watch-provider pair is included only when the query carries
    /// a provider id.
    fn discover_params(&self, query: &GenreQuery) -> Vec<(&'static str, String)> {
        let genre_ids = query
            .genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("with_genres", genre_ids),
            ("region", query.region.clone()),
            ("sort_by", query.sort.as_str().to_string()),
        ];

        if let Some(provider_id) = query.provider_id {
            params.push(("with_watch_providers", provider_id.to_string()));
            params.push(("watch_region", query.region.clone()));
        }

        params
    }

    async fn fetch_results(
        &self,
        url: String,
        params: Vec<(&'static str, String)>,
    ) -> AppResult<Vec<CatalogMovie>> {
        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let discover: DiscoverResponse = response.json().await?;
        Ok(discover.results)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn discover_by_genre(&self, query: &GenreQuery) -> AppResult<Vec<CatalogMovie>> {
        let url = format!("{}/discover/movie", self.api_url);
        let results = self.fetch_results(url, self.discover_params(query)).await?;

        tracing::info!(
            genre_ids = ?query.genre_ids,
            provider_id = ?query.provider_id,
            region = %query.region,
            results = results.len(),
            "Catalog discovery completed"
        );

        Ok(results)
    }

    async fn popular(&self, region: &str) -> AppResult<Vec<CatalogMovie>> {
        let url = format!("{}/movie/popular", self.api_url);
        let params = vec![
            ("api_key", self.api_key.clone()),
            ("sort_by", SortOrder::PopularityDesc.as_str().to_string()),
            ("region", region.to_string()),
        ];
        let results = self.fetch_results(url, params).await?;

        tracing::info!(region = %region, results = results.len(), "Popular movies fetched");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TmdbProvider {
        TmdbProvider::new(
            "test-key".to_string(),
            "https://api.example/3".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn query(provider_id: Option<u32>) -> GenreQuery {
        GenreQuery {
            genre_ids: vec![35, 18],
            provider_id,
            region: "IN".to_string(),
            sort: SortOrder::PopularityDesc,
        }
    }

    #[test]
    fn test_discover_params_without_provider() {
        let params = provider().discover_params(&query(None));
        assert_eq!(
            params,
            vec![
                ("api_key", "test-key".to_string()),
                ("with_genres", "35,18".to_string()),
                ("region", "IN".to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_params_with_provider_filter() {
        let params = provider().discover_params(&query(Some(9)));
        assert!(params.contains(&("with_watch_providers", "9".to_string())));
        assert!(params.contains(&("watch_region", "IN".to_string())));
    }

    #[test]
    fn test_duplicate_genre_ids_pass_through() {
        let mut q = query(None);
        q.genre_ids = vec![878, 878];
        let params = provider().discover_params(&q);
        assert!(params.contains(&("with_genres", "878,878".to_string())));
    }

    #[test]
    fn test_discover_response_tolerates_missing_results() {
        let parsed: DiscoverResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
