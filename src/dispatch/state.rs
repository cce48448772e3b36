use std::io::Write;

use crate::config::Config;
use crate::fetcher::{CancelToken, FeedFetcher};
use crate::storage::Store;

/// Everything a handler may touch, threaded from the entry point
pub struct State<'a> {
    pub config: Config,
    pub store: Store,
    pub fetcher: Box<dyn FeedFetcher>,
    pub cancel: CancelToken,
    pub out: &'a mut dyn Write,
}

impl<'a> State<'a> {
    pub fn new(
        config: Config,
        store: Store,
        fetcher: Box<dyn FeedFetcher>,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            cancel: CancelToken::new(),
            out,
        }
    }
}
