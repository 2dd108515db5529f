use crate::error::{Result, ScanError};
use crate::result::FetchedPage;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Single-shot HTTP GET client. One request per call, no retries.
pub struct Fetcher {
    client: Client,
    timeout_secs: u64,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("policyscan/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// GET `url` and return the body. Transport failures and non-2xx
    /// statuses are both errors.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url).map_err(|e| ScanError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Fetching {}", parsed);

        let start = Instant::now();
        let response = self.client.get(parsed).send().await?;
        let response_time = start.elapsed();

        let status_code = response.status().as_u16();
        // unfollowed 3xx responses count as failures too
        if !response.status().is_success() {
            return Err(ScanError::UnexpectedStatus {
                url: url.to_string(),
                status: status_code,
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().await?.to_vec();

        let mut page = FetchedPage::new(url.to_string());
        page.status_code = status_code;
        page.content_type = content_type;
        page.response_time = response_time;
        page.body = body;

        if !page.is_html() {
            warn!(
                "{} returned content type {:?}, parsing as HTML anyway",
                url, page.content_type
            );
        }

        info!(
            "Fetched {} ({} bytes, status {}, {:?})",
            url,
            page.body.len(),
            status_code,
            response_time
        );

        Ok(page)
    }
}
