use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{parse_comma_decimal, text_of};
use crate::error::CardError;
use crate::model::Review;

static CARD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".review-card").unwrap());
static AUTHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.meta-title span").unwrap());
static NOTE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".stareval-note").unwrap());
static CONTENT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".review-card-content").unwrap());
// Author stats appear as "<n> críticas" / "<n> seguidores" spans, in that
// order, on cards of registered users. Anonymous cards omit them.
static STATS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".user-info .stats-number").unwrap());

/// All review cards on a spectator-reviews page, in document order.
pub fn review_cards(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&CARD_SEL).collect()
}

/// Extract one review card. The author is the only hard requirement;
/// everything else degrades to a default so sparse cards still count.
pub fn extract_review(card: ElementRef<'_>) -> Result<Review, CardError> {
    let author = card
        .select(&AUTHOR_SEL)
        .next()
        .map(text_of)
        .filter(|a| !a.is_empty())
        .ok_or(CardError::MissingAuthor)?;

    let rating = card
        .select(&NOTE_SEL)
        .next()
        .and_then(|el| parse_comma_decimal(&text_of(el)))
        .unwrap_or(0.0);

    let content = card.select(&CONTENT_SEL).next().map(text_of).unwrap_or_default();

    let mut stats = card.select(&STATS_SEL).map(|el| leading_int(&text_of(el)));
    let review_count = stats.next().flatten();
    let follower_count = stats.next().flatten();

    Ok(Review {
        author,
        rating,
        content,
        review_count,
        follower_count,
    })
}

/// Parse the leading digit run of a string ("132 críticas" -> 132).
fn leading_int(text: &str) -> Option<u32> {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
