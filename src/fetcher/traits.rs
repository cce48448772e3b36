use crate::domain::RssFeed;
use crate::errors::GatorResult;
use crate::fetcher::CancelToken;

#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher {
    /// Fetch, decode and normalize the RSS document at `url`
    fn fetch(&self, cancel: &CancelToken, url: &str) -> GatorResult<RssFeed>;
}
