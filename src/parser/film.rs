use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{attr_of, parse_comma_decimal, text_of};
use crate::error::ScrapeError;
use crate::model::Film;

static LISTING_LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.meta-title-link").unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.title").unwrap());
static NOTE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.note").unwrap());
static SYNOPSIS_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.bo-p").unwrap());

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Hrefs of every film link on a listing page, in document order.
pub fn listing_links(doc: &Html) -> Vec<String> {
    doc.select(&LISTING_LINK_SEL)
        .filter_map(|a| attr_of(a, "href"))
        .collect()
}

/// Extract a film's top-level attributes from its detail page.
///
/// Title and rating are hard requirements; a page without them is not a
/// film page and the whole run should stop rather than export garbage.
pub fn extract_film(doc: &Html, id: u32, url: &str) -> Result<Film, ScrapeError> {
    let title = doc
        .select(&TITLE_SEL)
        .next()
        .ok_or_else(|| ScrapeError::Parse {
            what: "film title (div.title)",
            url: url.to_string(),
        })?;
    let raw: String = title.text().collect();
    let name = WS_RE.replace_all(raw.trim(), " ").to_string();

    let note = doc
        .select(&NOTE_SEL)
        .next()
        .ok_or_else(|| ScrapeError::Parse {
            what: "film rating (span.note)",
            url: url.to_string(),
        })?;
    let note_text = text_of(note);
    let rating = parse_comma_decimal(&note_text).ok_or_else(|| ScrapeError::InvalidRating {
        text: note_text,
        url: url.to_string(),
    })?;

    let summary = doc
        .select(&SYNOPSIS_SEL)
        .map(text_of)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Film {
        id,
        name,
        rating,
        summary,
        source_url: Some(url.to_string()),
        reviews: Vec::new(),
    })
}
