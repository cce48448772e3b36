use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::PostRepository;

pub struct SqlitePostRepository {
    storage: SqliteStorage,
}

impl SqlitePostRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl PostRepository for SqlitePostRepository {
    fn create_if_absent(&self, post: &Post) -> GatorResult<bool> {
        let conn = self.storage.connection()?;
        let inserted = conn.execute(
            "INSERT INTO posts (id, created_at, updated_at, title, url, description, published_at, feed_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(url) DO NOTHING",
            (
                &post.id,
                &post.created_at,
                &post.updated_at,
                &post.title,
                &post.url,
                &post.description,
                &post.published_at,
                &post.feed_id,
            ),
        )?;
        Ok(inserted > 0)
    }

    fn list_for_user(&self, user_id: Uuid, limit: usize) -> GatorResult<Vec<Post>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT posts.id, posts.created_at, posts.updated_at, posts.title, posts.url,
                    posts.description, posts.published_at, posts.feed_id
             FROM posts
             JOIN feed_follows ON feed_follows.feed_id = posts.feed_id
             WHERE feed_follows.user_id = ?1
             ORDER BY posts.published_at IS NULL, posts.published_at DESC, posts.created_at DESC
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let posts = stmt.query_map((&user_id, limit), |row| {
            Ok(Post {
                id: row.get(0)?,
                created_at: row.get(1)?,
                updated_at: row.get(2)?,
                title: row.get(3)?,
                url: row.get(4)?,
                description: row.get(5)?,
                published_at: row.get(6)?,
                feed_id: row.get(7)?,
            })
        })?;

        posts.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }
}
