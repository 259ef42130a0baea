/// Genre classification
///
/// A single-pass keyword-scoring heuristic over a fixed genre dictionary,
/// with one text-generation request as a fallback when nothing matches.
/// Matching is deliberately plain case-insensitive substring search, not a
/// tokenizer.
use std::sync::Arc;

use crate::services::providers::{PromptMode, TextGenerator};

/// Genre tag -> catalog genre id, in declaration order.
///
/// `sci` and `scifi` are aliases sharing one catalog id.
const GENRE_IDS: &[(&str, u32)] = &[
    ("action", 28),
    ("comedy", 35),
    ("drama", 18),
    ("horror", 27),
    ("romance", 10749),
    ("thriller", 53),
    ("sci", 878),
    ("scifi", 878),
    ("animation", 16),
];

/// Genre tag -> trigger phrases, in declaration order. Declaration order is
/// the tie-break when two genres score equally.
const GENRE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "action",
        &[
            "action", "fight", "fighting", "battle", "explosion", "adventure", "superhero",
            "hero", "combat", "war",
        ],
    ),
    (
        "comedy",
        &[
            "comedy", "funny", "laugh", "humor", "hilarious", "comic", "joke", "lighthearted",
            "fun",
        ],
    ),
    (
        "drama",
        &["drama", "emotional", "serious", "touching", "sad", "tear", "moving", "deep"],
    ),
    (
        "horror",
        &[
            "horror", "scary", "terror", "frightening", "creepy", "spooky", "ghost", "zombie",
            "monster",
        ],
    ),
    (
        "romance",
        &["romance", "love", "romantic", "relationship", "dating", "couple", "heart"],
    ),
    (
        "thriller",
        &["thriller", "suspense", "mystery", "tense", "detective", "crime", "investigation"],
    ),
    (
        "sci",
        &[
            "sci-fi", "science fiction", "space", "future", "alien", "robot", "time travel",
            "dystopia",
        ],
    ),
    (
        "scifi",
        &[
            "sci-fi", "science fiction", "space", "future", "alien", "robot", "time travel",
            "dystopia",
        ],
    ),
    (
        "animation",
        &["animation", "animated", "cartoon", "anime", "pixar", "disney"],
    ),
];

/// At most this many genres are kept per message
const MAX_GENRES: usize = 2;

pub struct GenreClassifier {
    generator: Arc<dyn TextGenerator>,
}

impl GenreClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Extracts up to two genre tags from a message.
    ///
    /// Keyword scoring first; when nothing matches, one text-generation
    /// request is made and its reply scanned for known tags. A failed
    /// fallback yields the empty sequence.
    pub async fn classify(&self, message: &str) -> Vec<&'static str> {
        let genres = Self::score_keywords(message);
        if !genres.is_empty() {
            return genres;
        }

        tracing::debug!("No genre keywords matched, trying LLM fallback");
        self.extract_via_llm(message).await
    }

    /// Scores every genre by trigger-phrase substring hits, keeps the
    /// non-zero ones, and returns the top two by descending count.
    /// `sort_by` is stable, so ties keep declaration order.
    fn score_keywords(message: &str) -> Vec<&'static str> {
        let lower = message.to_lowercase();

        let mut scores: Vec<(&'static str, usize)> = GENRE_KEYWORDS
            .iter()
            .map(|(genre, keywords)| {
                let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
                (*genre, hits)
            })
            .filter(|(_, hits)| *hits > 0)
            .collect();

        scores.sort_by(|a, b| b.1.cmp(&a.1));

        scores
            .into_iter()
            .take(MAX_GENRES)
            .map(|(genre, _)| genre)
            .collect()
    }

    /// Asks the model to name 1-2 genres and scans the reply for known tags
    /// in declaration order.
    async fn extract_via_llm(&self, message: &str) -> Vec<&'static str> {
        let prompt = format!(
            "Extract 1-2 movie genres from: \"{}\"\n\
             Reply ONLY with genre names separated by comma (e.g., \"action, thriller\")",
            message
        );

        let reply = self.generator.generate(&prompt, PromptMode::Chat).await;
        let lower = reply.to_lowercase();

        GENRE_IDS
            .iter()
            .filter(|(genre, _)| lower.contains(genre))
            .take(MAX_GENRES)
            .map(|(genre, _)| *genre)
            .collect()
    }

    /// Maps genre tags to catalog genre ids. Unknown tags are dropped;
    /// duplicate ids (sci/scifi) are passed through undeduplicated.
    pub fn genre_ids(genres: &[&str]) -> Vec<u32> {
        genres
            .iter()
            .filter_map(|genre| {
                GENRE_IDS
                    .iter()
                    .find(|(tag, _)| tag == genre)
                    .map(|(_, id)| *id)
            })
            .collect()
    }
}
