pub mod command;
pub mod feed;
pub mod follow;
pub mod post;
pub mod rss;
pub mod user;

pub use command::Command;
pub use feed::{Feed, FeedWithOwner};
pub use follow::{Follow, FollowDetails};
pub use post::Post;
pub use rss::{RssChannel, RssFeed, RssItem};
pub use user::User;
