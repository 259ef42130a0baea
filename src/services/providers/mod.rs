/// Outbound provider abstractions
///
/// The chat pipeline talks to two external collaborators: the movie catalog
/// and a local text-generation service. Both sit behind traits so the
/// orchestration layer can be exercised against mocks.
use crate::{
    error::AppResult,
    models::{CatalogMovie, GenreQuery},
};

pub mod local_llm;
pub mod tmdb;

pub use local_llm::LocalLlmGenerator;
pub use tmdb::TmdbProvider;

/// Prompt flavor for the text-generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Conversational reply, one short sentence, no movie talk unless asked
    Chat,
    /// One friendly sentence acknowledging a movie request, no listing
    MovieIntro,
    /// Raw User/Assistant passthrough
    Generic,
}

/// Read-only movie catalog operations
///
/// Both operations surface transport and service failures to the caller; the
/// caller decides how to degrade. No retries are attempted here.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Discover movies matching a genre set, optionally restricted to a
    /// watch provider within the query's region. Ordered by the query's
    /// sort order.
    async fn discover_by_genre(&self, query: &GenreQuery) -> AppResult<Vec<CatalogMovie>>;

    /// Popular movies for a region, used when no genre could be resolved.
    async fn popular(&self, region: &str) -> AppResult<Vec<CatalogMovie>>;
}

/// Text-generation client
///
/// `generate` never fails: the client absorbs its own transport errors and
/// substitutes a canned sentence, so callers always get usable text.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, input: &str, mode: PromptMode) -> String;
}
