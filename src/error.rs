use thiserror::Error;

/// Failures that abort a scrape run.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("missing {what} on {url}")]
    Parse { what: &'static str, url: String },

    #[error("unparseable rating text {text:?} on {url}")]
    InvalidRating { text: String, url: String },

    #[error("cannot resolve link {href:?} against {base}")]
    BadLink { href: String, base: String },
}

/// Per-review-card failures. These never abort a run: the pipeline logs
/// the card and moves on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CardError {
    #[error("review card has no author element")]
    MissingAuthor,
}
