use tracing::{info, warn};

use crate::domain::{Feed, FeedWithOwner, Follow, FollowDetails, User};
use crate::errors::{GatorError, GatorResult};
use crate::fetcher::http::parse_feed_url;
use crate::storage::Store;

pub struct FeedService<'a> {
    store: &'a Store,
}

impl<'a> FeedService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a feed owned by `user` and follow it in one step.
    /// If the follow cannot be written the new feed is removed again.
    pub fn add(&self, user: &User, name: &str, url: &str) -> GatorResult<(Feed, FollowDetails)> {
        parse_feed_url(url)?;

        let feed = Feed::new(name.to_string(), url.to_string(), user.id);
        self.store.feeds.create(&feed)?;
        info!(feed = %feed.name, url = %feed.url, "feed created");

        match self.store.follows.create(&Follow::new(user.id, feed.id)) {
            Ok(details) => Ok((feed, details)),
            Err(e) => {
                warn!(url = %feed.url, error = %e, "auto-follow failed, removing feed");
                if let Err(cleanup) = self.store.feeds.delete(feed.id) {
                    warn!(url = %feed.url, error = %cleanup, "could not remove orphaned feed");
                }
                Err(e)
            }
        }
    }

    pub fn list(&self) -> GatorResult<Vec<FeedWithOwner>> {
        self.store.feeds.list_with_owner()
    }

    pub fn follow(&self, user: &User, url: &str) -> GatorResult<FollowDetails> {
        let feed = self
            .store
            .feeds
            .get_by_url(url)?
            .ok_or_else(|| GatorError::FeedNotFound(url.to_string()))?;

        self.store.follows.create(&Follow::new(user.id, feed.id))
    }

    pub fn following(&self, user: &User) -> GatorResult<Vec<FollowDetails>> {
        self.store.follows.list_for_user(user.id)
    }

    /// Returns the number of follows removed; an unknown url removes nothing
    pub fn unfollow(&self, user: &User, url: &str) -> GatorResult<usize> {
        self.store.follows.delete_by_user_and_url(user.id, url)
    }
}
