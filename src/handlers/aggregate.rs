use std::io::Write;

use crate::dispatch::State;
use crate::domain::{Command, User};
use crate::errors::{GatorError, GatorResult};
use crate::services::IngestService;

pub const DEFAULT_FEED_URL: &str = "https://www.wagslane.dev/index.xml";
const DEFAULT_BROWSE_LIMIT: usize = 2;

/// Fetch one feed and print it; nothing is stored
pub fn agg(state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
    let url = cmd.arg(0).unwrap_or(DEFAULT_FEED_URL);

    let feed = state.fetcher.fetch(&state.cancel, url)?;
    let channel = &feed.channel;

    writeln!(state.out, "Feed Title: {}", channel.title)?;
    writeln!(state.out, "Description: {}", channel.description)?;
    writeln!(state.out, "Link: {}", channel.link)?;
    writeln!(state.out)?;

    for item in &channel.items {
        writeln!(state.out, "Title: {}", item.title)?;
        writeln!(state.out, "Link: {}", item.link)?;
        writeln!(state.out, "Date: {}", item.pub_date)?;
        writeln!(state.out)?;
    }
    Ok(())
}

/// Fetch the least recently fetched feed and store its items as posts
pub fn scrape(state: &mut State<'_>, _cmd: &Command) -> GatorResult<()> {
    let report = IngestService::new(&state.store, state.fetcher.as_ref()).scrape_next(&state.cancel)?;

    match report {
        Some(report) => {
            writeln!(
                state.out,
                "Scraped {} ({}): {} items, {} new posts",
                report.feed_name, report.feed_url, report.items, report.inserted
            )?;
            if report.skipped > 0 {
                writeln!(state.out, "Skipped {} items without a link", report.skipped)?;
            }
        }
        None => writeln!(state.out, "No feeds to scrape.")?,
    }
    Ok(())
}

pub fn browse(state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()> {
    let limit = match cmd.arg(0) {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            GatorError::InvalidInput(format!("limit must be a non-negative number, got '{}'", raw))
        })?,
        None => DEFAULT_BROWSE_LIMIT,
    };

    let posts = state.store.posts.list_for_user(user.id, limit)?;

    if posts.is_empty() {
        writeln!(state.out, "No posts yet. Run scrape to fetch followed feeds.")?;
        return Ok(());
    }

    for post in posts {
        writeln!(state.out, "* {}", post.title)?;
        writeln!(state.out, "  {}", post.url)?;
        if let Some(published) = post.published_at {
            writeln!(state.out, "  published {}", published.format("%Y-%m-%d %H:%M"))?;
        }
        if !post.description.is_empty() {
            writeln!(state.out, "  {}", post.description)?;
        }
    }
    Ok(())
}
