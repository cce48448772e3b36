use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::domain::RssFeed;
use crate::errors::{GatorError, GatorResult};
use crate::fetcher::{normalize, parse_document, CancelToken, FeedFetcher};

pub const CLIENT_NAME: &str = "gator";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new() -> GatorResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    fn fetch_bytes(&self, cancel: &CancelToken, url: &str) -> GatorResult<Vec<u8>> {
        let parsed = parse_feed_url(url)?;
        cancel.check()?;

        debug!(url = %parsed, "fetching feed");
        let response = self
            .client
            .get(parsed)
            .header(USER_AGENT, CLIENT_NAME)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GatorError::BadStatus(status.as_u16()));
        }

        let bytes = response.bytes().map_err(GatorError::BodyRead)?;
        debug!(bytes = bytes.len(), "feed body read");
        cancel.check()?;

        Ok(bytes.to_vec())
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn fetch(&self, cancel: &CancelToken, url: &str) -> GatorResult<RssFeed> {
        let bytes = self.fetch_bytes(cancel, url)?;
        let document = parse_document(&bytes)?;
        Ok(normalize(document))
    }
}

/// Accept only absolute http(s) URLs
pub fn parse_feed_url(url: &str) -> GatorResult<Url> {
    let parsed = Url::parse(url).map_err(|e| GatorError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(GatorError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}
