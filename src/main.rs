use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gator::cli::Cli;
use gator::config::Config;
use gator::dispatch::State;
use gator::errors::GatorResult;
use gator::fetcher::HttpFeedFetcher;
use gator::handlers;
use gator::storage::{SqliteStorage, Store};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> GatorResult<()> {
    let registry = handlers::registry()?;
    let cli = Cli::parse_listing(&registry.names());

    let config = Config::load()?;

    let storage = SqliteStorage::new(config.db_path())?;
    let store = Store::sqlite(storage);
    let fetcher = HttpFeedFetcher::new()?;

    let mut stdout = io::stdout().lock();
    let mut state = State::new(config, store, Box::new(fetcher), &mut stdout);

    registry.run(&mut state, &cli.into_command())
}
