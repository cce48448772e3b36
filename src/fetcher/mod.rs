pub mod cancel;
pub mod http;
pub mod normalizer;
pub mod parser;
pub mod traits;

pub use cancel::CancelToken;
pub use http::HttpFeedFetcher;
pub use normalizer::normalize;
pub use parser::parse_document;
pub use traits::FeedFetcher;

#[cfg(test)]
pub use traits::MockFeedFetcher;
