/// Chat message orchestration
///
/// Classifies intent, routes chat messages to the text generator, and drives
/// the genre -> catalog -> card pipeline for movie requests. Every upstream
/// failure on the movie path degrades to a safe default; the caller always
/// gets a conversational reply.
use std::sync::Arc;

use crate::{
    models::{GenreQuery, MovieCard, ProviderFilter, SortOrder},
    services::{
        genres::GenreClassifier,
        providers::{CatalogProvider, PromptMode, TextGenerator},
    },
};

/// Any of these substrings marks a message as a movie request
const MOVIE_KEYWORDS: &[&str] = &["movie", "film", "show", "series", "recommend"];

/// Cards returned per request
const MAX_RESULTS: usize = 5;

const DEFAULT_GREETING: &str = "Hello! How can I help you today?";
const MOVIE_REPLY: &str = "Here are some great movies for you! 🎬";

/// Reply payload for one chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub movies: Vec<MovieCard>,
}

pub struct ChatService {
    catalog: Arc<dyn CatalogProvider>,
    generator: Arc<dyn TextGenerator>,
    classifier: GenreClassifier,
    image_base: String,
}

impl ChatService {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        generator: Arc<dyn TextGenerator>,
        image_base: String,
    ) -> Self {
        let classifier = GenreClassifier::new(generator.clone());
        Self {
            catalog,
            generator,
            classifier,
            image_base,
        }
    }

    /// Handles one chat turn. Infallible: upstream failures are absorbed
    /// into degraded defaults rather than surfaced.
    pub async fn handle(&self, message: &str, platform: Option<&str>) -> ChatReply {
        let lower = message.to_lowercase();
        let is_movie_request = MOVIE_KEYWORDS.iter().any(|k| lower.contains(k));

        if !is_movie_request {
            return self.chat_reply(message).await;
        }

        self.movie_reply(message, platform).await
    }

    /// Plain conversation: delegate to the text generator, no catalog call.
    async fn chat_reply(&self, message: &str) -> ChatReply {
        let text = self.generator.generate(message, PromptMode::Chat).await;
        let text = if text.is_empty() {
            DEFAULT_GREETING.to_string()
        } else {
            text
        };

        ChatReply {
            text,
            movies: vec![],
        }
    }

    /// Movie request: resolve the platform, classify genres, query the
    /// catalog, and project the top results into cards. The reply text is a
    /// fixed sentence; no text-generation call is made here.
    async fn movie_reply(&self, message: &str, platform: Option<&str>) -> ChatReply {
        let filter = ProviderFilter::resolve(platform);

        let genres = self.classifier.classify(message).await;
        let genre_ids = GenreClassifier::genre_ids(&genres);

        tracing::info!(
            genres = ?genres,
            genre_ids = ?genre_ids,
            provider_id = ?filter.provider_id,
            region = %filter.region,
            "Movie request classified"
        );

        let fetched = if genre_ids.is_empty() {
            self.catalog.popular(filter.region).await
        } else {
            let query = GenreQuery {
                genre_ids,
                provider_id: filter.provider_id,
                region: filter.region.to_string(),
                sort: SortOrder::PopularityDesc,
            };
            self.catalog.discover_by_genre(&query).await
        };

        // Catalog failures degrade to an empty list, never to an error
        let movies = fetched.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Catalog fetch failed, returning no movies");
            vec![]
        });

        let movies = movies
            .into_iter()
            .take(MAX_RESULTS)
            .map(|m| MovieCard::from_catalog(m, &self.image_base))
            .collect();

        ChatReply {
            text: MOVIE_REPLY.to_string(),
            movies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::CatalogMovie;
    use crate::services::providers::{MockCatalogProvider, MockTextGenerator};

    fn catalog_movie(id: u64) -> CatalogMovie {
        CatalogMovie {
            id,
            title: format!("Movie {}", id),
            overview: "Synopsis".to_string(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            vote_average: 7.0,
            release_date: "2020-01-01".to_string(),
        }
    }

    fn service(catalog: MockCatalogProvider, generator: MockTextGenerator) -> ChatService {
        ChatService::new(
            Arc::new(catalog),
            Arc::new(generator),
            "https://image.tmdb.org/t/p/w200".to_string(),
        )
    }

    fn silent_catalog() -> MockCatalogProvider {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_discover_by_genre().never();
        catalog.expect_popular().never();
        catalog
    }

    #[tokio::test]
    async fn test_chat_path_never_queries_catalog() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|_, mode| *mode == PromptMode::Chat)
            .returning(|_, _| "Hi there!".to_string());

        let reply = service(silent_catalog(), generator).handle("hello bot", None).await;
        assert_eq!(reply.text, "Hi there!");
        assert!(reply.movies.is_empty());
    }

    #[tokio::test]
    async fn test_chat_path_default_greeting_on_empty_text() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_, _| String::new());

        let reply = service(silent_catalog(), generator).handle("hi", None).await;
        assert_eq!(reply.text, DEFAULT_GREETING);
    }

    #[tokio::test]
    async fn test_movie_path_discovers_by_genre() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_discover_by_genre()
            .withf(|query| {
                query.genre_ids == vec![35]
                    && query.provider_id.is_none()
                    && query.region == "US"
                    && query.sort == SortOrder::PopularityDesc
            })
            .returning(|_| Ok(vec![catalog_movie(1)]));
        catalog.expect_popular().never();

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let reply = service(catalog, generator)
            .handle("recommend a funny movie", None)
            .await;
        assert_eq!(reply.text, MOVIE_REPLY);
        assert_eq!(reply.movies.len(), 1);
        assert_eq!(
            reply.movies[0].poster_path.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/poster-1.jpg")
        );
    }

    #[tokio::test]
    async fn test_movie_path_applies_platform_filter() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_discover_by_genre()
            .withf(|query| query.provider_id == Some(337) && query.region == "IN")
            .returning(|_| Ok(vec![]));

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let reply = service(catalog, generator)
            .handle("recommend an action movie", Some("hotstar"))
            .await;
        assert!(reply.movies.is_empty());
    }

    #[tokio::test]
    async fn test_no_genres_falls_back_to_popular() {
        let mut catalog = MockCatalogProvider::new();
        catalog.expect_discover_by_genre().never();
        catalog
            .expect_popular()
            .withf(|region| region == "US")
            .returning(|_| Ok(vec![catalog_movie(2)]));

        // Genre fallback reply names no genre, so classification stays empty
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| "I cannot tell.".to_string());

        let reply = service(catalog, generator)
            .handle("recommend something", None)
            .await;
        assert_eq!(reply.movies.len(), 1);
    }

    #[tokio::test]
    async fn test_results_capped_at_five_in_catalog_order() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_discover_by_genre()
            .returning(|_| Ok((0..8).map(catalog_movie).collect()));

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let reply = service(catalog, generator)
            .handle("show me scary films", None)
            .await;
        assert_eq!(reply.movies.len(), 5);
        let ids: Vec<u64> = reply.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_catalog_failure_degrades_to_empty_list() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_discover_by_genre()
            .returning(|_| Err(AppError::ExternalApi("catalog down".to_string())));

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let reply = service(catalog, generator)
            .handle("recommend a thriller movie", None)
            .await;
        assert_eq!(reply.text, MOVIE_REPLY);
        assert!(reply.movies.is_empty());
    }
}
