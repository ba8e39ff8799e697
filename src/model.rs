use serde::Serialize;

/// A scraped film. `id` is assigned sequentially during the listing scan
/// and is the join key between the two exported tables, so duplicate
/// titles cannot collide rows.
#[derive(Debug, Clone, Serialize)]
pub struct Film {
    pub id: u32,
    pub name: String,
    pub rating: f64,
    pub summary: String,
    pub source_url: Option<String>,
    pub reviews: Vec<Review>,
}

/// A single spectator review belonging to one film.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub author: String,
    pub rating: f64,
    pub content: String,
    /// How many reviews the author has written, when the card shows it.
    pub review_count: Option<u32>,
    /// How many followers the author has, when the card shows it.
    pub follower_count: Option<u32>,
}

/// The three derived token sequences for one piece of text.
///
/// `filtered_tokens` and `stems` are parallel (stop words and punctuation
/// removed before stemming); `lemmas` has one entry per token of the
/// *unfiltered* stream, stop words and punctuation included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenSets {
    pub filtered_tokens: Vec<String>,
    pub stems: Vec<String>,
    pub lemmas: Vec<String>,
}

/// A film whose summary has been run through the normalizer.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedFilm {
    pub film: Film,
    pub summary_tokens: TokenSets,
    pub reviews: Vec<EnrichedReview>,
}

/// A review whose content has been run through the normalizer.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedReview {
    pub review: Review,
    pub content_tokens: TokenSets,
}
