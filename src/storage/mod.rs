pub mod sqlite;
pub mod traits;

pub use sqlite::{
    SqliteFeedRepository, SqliteFollowRepository, SqlitePostRepository, SqliteStorage,
    SqliteUserRepository,
};
pub use traits::{FeedRepository, FollowRepository, PostRepository, UserRepository};

/// The persistence gateway: every durable entity is reached through one of these
pub struct Store {
    pub users: Box<dyn UserRepository>,
    pub feeds: Box<dyn FeedRepository>,
    pub follows: Box<dyn FollowRepository>,
    pub posts: Box<dyn PostRepository>,
}

impl Store {
    pub fn sqlite(storage: SqliteStorage) -> Self {
        Self {
            users: Box::new(SqliteUserRepository::new(storage.clone())),
            feeds: Box::new(SqliteFeedRepository::new(storage.clone())),
            follows: Box::new(SqliteFollowRepository::new(storage.clone())),
            posts: Box::new(SqlitePostRepository::new(storage)),
        }
    }
}
