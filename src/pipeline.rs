use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::fetch::Fetch;
use crate::model::{EnrichedFilm, EnrichedReview, Film};
use crate::nlp::TextNormalizer;
use crate::parser::{film, review};

const LISTING_URL: &str = "https://www.adorocinema.com/filmes/melhores/adorocinema/?page=";

static BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://www.adorocinema.com").unwrap());

/// Call-time knobs for one run.
pub struct ScrapeConfig {
    pub pages: u32,
    pub max_reviews: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            pages: 2,
            max_reviews: 40,
        }
    }
}

/// Two-phase extraction: scan the best-of listing for films, then pull
/// spectator reviews per film. Fetches are strictly sequential.
pub struct Pipeline<F: Fetch> {
    fetcher: F,
    config: ScrapeConfig,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Run both phases and return the films in discovery order.
    pub async fn run(&self) -> Result<Vec<Film>, ScrapeError> {
        let mut films = self.scan_listing().await?;
        self.collect_reviews(&mut films).await?;
        Ok(films)
    }

    /// Phase 1: walk the paginated listing, fetch each film's critics
    /// page, and extract its top-level attributes. Any failure here
    /// aborts the run.
    pub async fn scan_listing(&self) -> Result<Vec<Film>, ScrapeError> {
        let mut films: Vec<Film> = Vec::new();

        for page in 1..=self.config.pages {
            let listing_html = self.fetcher.fetch(&format!("{LISTING_URL}{page}")).await?;
            let links = {
                let doc = Html::parse_document(&listing_html);
                film::listing_links(&doc)
            };
            info!("listing page {}: {} films", page, links.len());

            for href in links {
                let detail_url = BASE_URL.join(&href).map_err(|_| ScrapeError::BadLink {
                    href: href.clone(),
                    base: BASE_URL.to_string(),
                })?;
                let critics_url = format!("{detail_url}criticas-adorocinema/");
                let html = self.fetcher.fetch(&critics_url).await?;

                let id = films.len() as u32 + 1;
                let extracted = {
                    let doc = Html::parse_document(&html);
                    film::extract_film(&doc, id, detail_url.as_str())?
                };
                films.push(extracted);
            }
        }

        Ok(films)
    }

    /// Phase 2: fetch each film's spectator-reviews page and extract up
    /// to `max_reviews` cards. A bad card is logged and skipped; a bad
    /// page still aborts.
    pub async fn collect_reviews(&self, films: &mut [Film]) -> Result<(), ScrapeError> {
        let pb = ProgressBar::new(films.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} filmes")
                .unwrap()
                .progress_chars("=> "),
        );

        for film in films.iter_mut() {
            let detail_url = film.source_url.as_deref().unwrap_or_default();
            let reviews_url = format!(
                "{}/criticas/espectadores/",
                detail_url.trim_end_matches('/')
            );
            let html = self.fetcher.fetch(&reviews_url).await?;
            film.reviews = extract_cards(&html, self.config.max_reviews, &film.name);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(())
    }
}

/// Extract up to `max` review cards from a spectator-reviews page,
/// skipping (and logging) the ones that do not yield a review.
fn extract_cards(html: &str, max: usize, film_name: &str) -> Vec<crate::model::Review> {
    let doc = Html::parse_document(html);
    let mut reviews = Vec::new();

    for (index, card) in review::review_cards(&doc).into_iter().take(max).enumerate() {
        match review::extract_review(card) {
            Ok(r) => reviews.push(r),
            Err(e) => warn!("{}: skipping review card {}: {}", film_name, index, e),
        }
    }

    reviews
}

/// Run every summary and review through the normalizer, producing the
/// token-enriched record graph. Derived data is computed here wholesale,
/// never patched incrementally.
pub fn enrich(films: Vec<Film>, normalizer: &TextNormalizer) -> Vec<EnrichedFilm> {
    films
        .into_iter()
        .map(|film| {
            let summary_tokens = normalizer.normalize(&film.summary);
            let reviews = film
                .reviews
                .iter()
                .map(|review| EnrichedReview {
                    review: review.clone(),
                    content_tokens: normalizer.normalize(&review.content),
                })
                .collect();
            EnrichedFilm {
                film,
                summary_tokens,
                reviews,
            }
        })
        .collect()
}
