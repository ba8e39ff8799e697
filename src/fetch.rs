use reqwest::Client;
use tracing::info;

use crate::error::ScrapeError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Anything that can turn a URL into an HTML body. The pipeline is
/// written against this seam so tests can feed it recorded pages.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String, ScrapeError>>;
}

/// Live fetcher over a shared reqwest client. One GET per call, no
/// retries, transport-default timeouts.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Fetch for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        info!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| ScrapeError::Network {
            url: url.to_string(),
            source,
        })
    }
}
