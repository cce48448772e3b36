use std::io::Write;

use tracing::debug;

use super::required;
use crate::dispatch::State;
use crate::domain::{Command, User};
use crate::errors::GatorResult;
use crate::services::FeedService;

pub fn add_feed(state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()> {
    let usage = "addfeed <name> <url>";
    let name = required(cmd, 0, usage)?;
    let url = required(cmd, 1, usage)?;

    let (feed, follow) = FeedService::new(&state.store).add(user, name, url)?;

    writeln!(state.out, "Feed created successfully:")?;
    writeln!(state.out, "ID: {}", feed.id)?;
    writeln!(state.out, "Name: {}", feed.name)?;
    writeln!(state.out, "URL: {}", feed.url)?;
    writeln!(state.out, "UserID: {}", feed.user_id)?;
    writeln!(state.out, "{} is now following {}", follow.user_name, follow.feed_name)?;
    Ok(())
}

pub fn feeds(state: &mut State<'_>, _cmd: &Command) -> GatorResult<()> {
    let feeds = FeedService::new(&state.store).list()?;

    if feeds.is_empty() {
        writeln!(state.out, "No feeds found.")?;
        return Ok(());
    }

    writeln!(state.out, "Feeds:")?;
    for feed in feeds {
        writeln!(state.out, "* {} ({}) - added by {}", feed.name, feed.url, feed.user_name)?;
    }
    Ok(())
}

pub fn follow(state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()> {
    let url = required(cmd, 0, "follow <url>")?;

    let follow = FeedService::new(&state.store).follow(user, url)?;

    writeln!(state.out, "{} is now following {}", follow.user_name, follow.feed_name)?;
    Ok(())
}

pub fn following(state: &mut State<'_>, _cmd: &Command, user: &User) -> GatorResult<()> {
    let follows = FeedService::new(&state.store).following(user)?;

    if follows.is_empty() {
        writeln!(state.out, "{} is not following any feeds.", user.name)?;
        return Ok(());
    }

    writeln!(state.out, "{} is following:", user.name)?;
    for follow in follows {
        writeln!(state.out, "* {}", follow.feed_name)?;
    }
    Ok(())
}

pub fn unfollow(state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()> {
    let url = required(cmd, 0, "unfollow <url>")?;

    let removed = FeedService::new(&state.store).unfollow(user, url)?;
    debug!(url, removed, "unfollow");

    writeln!(state.out, "{} unfollowed {}", user.name, url)?;
    Ok(())
}
