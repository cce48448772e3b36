use tracing::{debug, info};

use crate::domain::{Feed, Post, RssFeed};
use crate::errors::GatorResult;
use crate::fetcher::{CancelToken, FeedFetcher};
use crate::storage::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub feed_name: String,
    pub feed_url: String,
    pub items: usize,
    pub inserted: usize,
    /// Items without a link, which cannot be keyed
    pub skipped: usize,
}

pub struct IngestService<'a> {
    store: &'a Store,
    fetcher: &'a dyn FeedFetcher,
}

impl<'a> IngestService<'a> {
    pub fn new(store: &'a Store, fetcher: &'a dyn FeedFetcher) -> Self {
        Self { store, fetcher }
    }

    /// One ingestion pass over the least recently fetched feed.
    /// Returns `None` when no feeds are registered.
    pub fn scrape_next(&self, cancel: &CancelToken) -> GatorResult<Option<ScrapeReport>> {
        let feed = match self.store.feeds.next_to_fetch()? {
            Some(feed) => feed,
            None => return Ok(None),
        };

        // Marked before fetching so a failing feed does not block the rotation
        self.store.feeds.mark_fetched(feed.id)?;

        let document = self.fetcher.fetch(cancel, &feed.url)?;
        let report = self.store_posts(&feed, &document)?;

        info!(
            feed = %report.feed_name,
            items = report.items,
            inserted = report.inserted,
            "feed scraped"
        );
        Ok(Some(report))
    }

    fn store_posts(&self, feed: &Feed, document: &RssFeed) -> GatorResult<ScrapeReport> {
        let mut inserted = 0;
        let mut skipped = 0;

        for item in &document.channel.items {
            let post = match Post::from_item(feed.id, item) {
                Some(post) => post,
                None => {
                    debug!(title = %item.title, "item has no link, skipping");
                    skipped += 1;
                    continue;
                }
            };

            if self.store.posts.create_if_absent(&post)? {
                inserted += 1;
            }
        }

        Ok(ScrapeReport {
            feed_name: feed.name.clone(),
            feed_url: feed.url.clone(),
            items: document.channel.items.len(),
            inserted,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Follow, RssChannel, RssItem, User};
    use crate::errors::GatorError;
    use crate::fetcher::MockFeedFetcher;
    use crate::storage::SqliteStorage;

    fn document(links: &[&str]) -> RssFeed {
        RssFeed {
            channel: RssChannel {
                title: "Boot.dev Blog".to_string(),
                link: "https://blog.boot.dev".to_string(),
                description: String::new(),
                items: links
                    .iter()
                    .map(|link| RssItem {
                        title: format!("Post at {}", link),
                        link: link.to_string(),
                        description: String::new(),
                        pub_date: "Tue, 02 Jan 2024 08:00:00 +0000".to_string(),
                    })
                    .collect(),
            },
        }
    }

    fn store_with_feed() -> (Store, User, Feed) {
        let store = Store::sqlite(SqliteStorage::in_memory().unwrap());
        let user = User::new("lane".to_string());
        store.users.create(&user).unwrap();
        let feed = Feed::new(
            "Boot.dev Blog".to_string(),
            "https://blog.boot.dev/index.xml".to_string(),
            user.id,
        );
        store.feeds.create(&feed).unwrap();
        store.follows.create(&Follow::new(user.id, feed.id)).unwrap();
        (store, user, feed)
    }

    #[test]
    fn test_no_feeds_is_none() {
        let store = Store::sqlite(SqliteStorage::in_memory().unwrap());
        let fetcher = MockFeedFetcher::new();

        let report = IngestService::new(&store, &fetcher)
            .scrape_next(&CancelToken::new())
            .unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_scrape_stores_posts_and_dedups() {
        let (store, user, _) = store_with_feed();
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|_, _| Ok(document(&["https://blog.boot.dev/a", "https://blog.boot.dev/b", ""])));

        let service = IngestService::new(&store, &fetcher);

        let first = service.scrape_next(&CancelToken::new()).unwrap().unwrap();
        assert_eq!(first.items, 3);
        assert_eq!(first.inserted, 2);
        assert_eq!(first.skipped, 1);

        let second = service.scrape_next(&CancelToken::new()).unwrap().unwrap();
        assert_eq!(second.inserted, 0);

        assert_eq!(store.posts.list_for_user(user.id, 10).unwrap().len(), 2);
    }

    #[test]
    fn test_fetch_failure_still_marks_fetched() {
        let (store, _, feed) = store_with_feed();
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_, _| Err(GatorError::BadStatus(503)));

        let result = IngestService::new(&store, &fetcher).scrape_next(&CancelToken::new());
        assert!(matches!(result, Err(GatorError::BadStatus(503))));

        let stored = store.feeds.get_by_url(&feed.url).unwrap().unwrap();
        assert!(stored.last_fetched_at.is_some());
    }
}
