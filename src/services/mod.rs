pub mod feed_service;
pub mod ingest_service;
pub mod user_service;

pub use feed_service::FeedService;
pub use ingest_service::{IngestService, ScrapeReport};
pub use user_service::UserService;
