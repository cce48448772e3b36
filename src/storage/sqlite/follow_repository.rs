use uuid::Uuid;

use crate::domain::{Follow, FollowDetails};
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FollowRepository;

pub struct SqliteFollowRepository {
    storage: SqliteStorage,
}

impl SqliteFollowRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl FollowRepository for SqliteFollowRepository {
    fn create(&self, follow: &Follow) -> GatorResult<FollowDetails> {
        let conn = self.storage.connection()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM feed_follows WHERE user_id = ?1 AND feed_id = ?2)",
            (&follow.user_id, &follow.feed_id),
            |row| row.get(0),
        )?;
        if exists {
            let url: String = conn.query_row(
                "SELECT url FROM feeds WHERE id = ?1",
                [&follow.feed_id],
                |row| row.get(0),
            )?;
            return Err(GatorError::AlreadyFollowing(url));
        }

        conn.execute(
            "INSERT INTO feed_follows (id, created_at, updated_at, user_id, feed_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &follow.id,
                &follow.created_at,
                &follow.updated_at,
                &follow.user_id,
                &follow.feed_id,
            ),
        )?;

        let details = conn.query_row(
            "SELECT feeds.name, feeds.url, users.name
             FROM feed_follows
             JOIN feeds ON feeds.id = feed_follows.feed_id
             JOIN users ON users.id = feed_follows.user_id
             WHERE feed_follows.id = ?1",
            [&follow.id],
            |row| {
                Ok(FollowDetails {
                    feed_name: row.get(0)?,
                    feed_url: row.get(1)?,
                    user_name: row.get(2)?,
                })
            },
        )?;
        Ok(details)
    }

    fn list_for_user(&self, user_id: Uuid) -> GatorResult<Vec<FollowDetails>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT feeds.name, feeds.url, users.name
             FROM feed_follows
             JOIN feeds ON feeds.id = feed_follows.feed_id
             JOIN users ON users.id = feed_follows.user_id
             WHERE feed_follows.user_id = ?1
             ORDER BY feed_follows.created_at",
        )?;

        let follows = stmt.query_map([user_id], |row| {
            Ok(FollowDetails {
                feed_name: row.get(0)?,
                feed_url: row.get(1)?,
                user_name: row.get(2)?,
            })
        })?;

        follows.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }

    fn delete_by_user_and_url(&self, user_id: Uuid, url: &str) -> GatorResult<usize> {
        let conn = self.storage.connection()?;
        let removed = conn.execute(
            "DELETE FROM feed_follows
             WHERE user_id = ?1 AND feed_id IN (SELECT id FROM feeds WHERE url = ?2)",
            (&user_id, url),
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feed, User};
    use crate::storage::sqlite::{SqliteFeedRepository, SqliteUserRepository};
    use crate::storage::traits::{FeedRepository, UserRepository};

    struct Fixture {
        follows: SqliteFollowRepository,
        user: User,
        feed: Feed,
    }

    fn setup() -> Fixture {
        let storage = SqliteStorage::in_memory().unwrap();
        let users = SqliteUserRepository::new(storage.clone());
        let feeds = SqliteFeedRepository::new(storage.clone());

        let user = User::new("ballan".to_string());
        users.create(&user).unwrap();
        let feed = Feed::new(
            "TechCrunch".to_string(),
            "https://techcrunch.com/feed/".to_string(),
            user.id,
        );
        feeds.create(&feed).unwrap();

        Fixture {
            follows: SqliteFollowRepository::new(storage),
            user,
            feed,
        }
    }

    #[test]
    fn test_create_returns_names() {
        let fx = setup();

        let details = fx.follows.create(&Follow::new(fx.user.id, fx.feed.id)).unwrap();

        assert_eq!(details.feed_name, "TechCrunch");
        assert_eq!(details.user_name, "ballan");
        assert_eq!(details.feed_url, "https://techcrunch.com/feed/");
    }

    #[test]
    fn test_duplicate_follow_rejected() {
        let fx = setup();
        fx.follows.create(&Follow::new(fx.user.id, fx.feed.id)).unwrap();

        let result = fx.follows.create(&Follow::new(fx.user.id, fx.feed.id));
        assert!(matches!(result, Err(GatorError::AlreadyFollowing(_))));
        assert_eq!(fx.follows.list_for_user(fx.user.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_user_and_url() {
        let fx = setup();
        fx.follows.create(&Follow::new(fx.user.id, fx.feed.id)).unwrap();

        let removed = fx
            .follows
            .delete_by_user_and_url(fx.user.id, "https://techcrunch.com/feed/")
            .unwrap();

        assert_eq!(removed, 1);
        assert!(fx.follows.list_for_user(fx.user.id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_url_is_noop() {
        let fx = setup();

        let removed = fx
            .follows
            .delete_by_user_and_url(fx.user.id, "https://never.followed/rss")
            .unwrap();
        assert_eq!(removed, 0);
    }
}
