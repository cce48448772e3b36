use chrono::Utc;
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::{Feed, FeedWithOwner};
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FeedRepository;

const FEED_COLUMNS: &str = "id, created_at, updated_at, name, url, user_id, last_fetched_at";

pub struct SqliteFeedRepository {
    storage: SqliteStorage,
}

impl SqliteFeedRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

fn feed_from_row(row: &Row<'_>) -> rusqlite::Result<Feed> {
    Ok(Feed {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        name: row.get(3)?,
        url: row.get(4)?,
        user_id: row.get(5)?,
        last_fetched_at: row.get(6)?,
    })
}

impl FeedRepository for SqliteFeedRepository {
    fn create(&self, feed: &Feed) -> GatorResult<()> {
        let conn = self.storage.connection()?;

        // Check within the same connection to avoid deadlock
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM feeds WHERE url = ?1)",
            [&feed.url],
            |row| row.get(0),
        )?;
        if exists {
            return Err(GatorError::FeedAlreadyExists(feed.url.clone()));
        }

        conn.execute(
            "INSERT INTO feeds (id, created_at, updated_at, name, url, user_id, last_fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &feed.id,
                &feed.created_at,
                &feed.updated_at,
                &feed.name,
                &feed.url,
                &feed.user_id,
                &feed.last_fetched_at,
            ),
        )?;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> GatorResult<()> {
        let conn = self.storage.connection()?;
        conn.execute("DELETE FROM feeds WHERE id = ?1", [id])?;
        Ok(())
    }

    fn get_by_url(&self, url: &str) -> GatorResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let feed = conn.query_row(
            &format!("SELECT {} FROM feeds WHERE url = ?1", FEED_COLUMNS),
            [url],
            feed_from_row,
        );

        match feed {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(GatorError::from(e)),
        }
    }

    fn list_with_owner(&self) -> GatorResult<Vec<FeedWithOwner>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT feeds.name, feeds.url, users.name
             FROM feeds JOIN users ON users.id = feeds.user_id
             ORDER BY feeds.created_at",
        )?;

        let feeds = stmt.query_map([], |row| {
            Ok(FeedWithOwner {
                name: row.get(0)?,
                url: row.get(1)?,
                user_name: row.get(2)?,
            })
        })?;

        feeds.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }

    fn next_to_fetch(&self) -> GatorResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let feed = conn.query_row(
            &format!(
                "SELECT {} FROM feeds
                 ORDER BY last_fetched_at IS NOT NULL, last_fetched_at, created_at
                 LIMIT 1",
                FEED_COLUMNS
            ),
            [],
            feed_from_row,
        );

        match feed {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(GatorError::from(e)),
        }
    }

    fn mark_fetched(&self, id: Uuid) -> GatorResult<()> {
        let conn = self.storage.connection()?;
        let now = Utc::now();
        let updated = conn.execute(
            "UPDATE feeds SET last_fetched_at = ?1, updated_at = ?1 WHERE id = ?2",
            (&now, &id),
        )?;

        if updated == 0 {
            return Err(GatorError::FeedNotFound(id.to_string()));
        }
        Ok(())
    }
}
