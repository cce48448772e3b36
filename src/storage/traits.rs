use uuid::Uuid;

use crate::domain::{Feed, FeedWithOwner, Follow, FollowDetails, Post, User};
use crate::errors::GatorResult;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository {
    fn create(&self, user: &User) -> GatorResult<()>;
    fn get_by_name(&self, name: &str) -> GatorResult<Option<User>>;
    fn list(&self) -> GatorResult<Vec<User>>;
    fn delete_all(&self) -> GatorResult<usize>;
}

#[cfg_attr(test, mockall::automock)]
pub trait FeedRepository {
    fn create(&self, feed: &Feed) -> GatorResult<()>;
    fn delete(&self, id: Uuid) -> GatorResult<()>;
    fn get_by_url(&self, url: &str) -> GatorResult<Option<Feed>>;
    fn list_with_owner(&self) -> GatorResult<Vec<FeedWithOwner>>;
    /// The feed fetched least recently, never-fetched feeds first
    fn next_to_fetch(&self) -> GatorResult<Option<Feed>>;
    fn mark_fetched(&self, id: Uuid) -> GatorResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait FollowRepository {
    fn create(&self, follow: &Follow) -> GatorResult<FollowDetails>;
    fn list_for_user(&self, user_id: Uuid) -> GatorResult<Vec<FollowDetails>>;
    /// Returns the number of rows removed; zero is not an error
    fn delete_by_user_and_url(&self, user_id: Uuid, url: &str) -> GatorResult<usize>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PostRepository {
    /// Insert unless a post with the same url exists. Returns whether a row was written.
    fn create_if_absent(&self, post: &Post) -> GatorResult<bool>;
    fn list_for_user(&self, user_id: Uuid, limit: usize) -> GatorResult<Vec<Post>>;
}
