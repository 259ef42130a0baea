use serde::{Deserialize, Serialize};

/// Raw movie record as returned by the catalog's `results` array
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
}

/// Movie card sent to the widget
///
/// A per-request projection of a catalog record; never persisted on its own.
/// `poster_path` holds the full composed image URL, or null when the catalog
/// had no poster for the movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub release_date: String,
}

impl MovieCard {
    /// Projects a catalog record into a card, composing the poster URL
    /// against `image_base` only when the record carries a poster path.
    pub fn from_catalog(movie: CatalogMovie, image_base: &str) -> Self {
        let poster_path = movie
            .poster_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", image_base, p));

        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            poster_path,
            vote_average: movie.vote_average,
            release_date: movie.release_date,
        }
    }
}

/// Sort order for catalog discovery queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PopularityDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
        }
    }
}

/// Transient catalog discovery query built per request
#[derive(Debug, Clone, PartialEq)]
pub struct GenreQuery {
    /// 0-2 catalog genre ids; duplicates are allowed and harmless
    pub genre_ids: Vec<u32>,
    pub provider_id: Option<u32>,
    pub region: String,
    pub sort: SortOrder,
}
