pub mod aggregate;
pub mod feeds;
pub mod users;

use crate::dispatch::{logged_in, Registry};
use crate::domain::Command;
use crate::errors::{GatorError, GatorResult};

/// The full command table
pub fn registry() -> GatorResult<Registry> {
    let mut registry = Registry::new();

    registry.register("login", users::login)?;
    registry.register("register", users::register)?;
    registry.register("reset", users::reset)?;
    registry.register("users", users::users)?;

    registry.register("agg", aggregate::agg)?;
    registry.register("scrape", aggregate::scrape)?;
    registry.register("browse", logged_in(aggregate::browse))?;

    registry.register("addfeed", logged_in(feeds::add_feed))?;
    registry.register("feeds", feeds::feeds)?;
    registry.register("follow", logged_in(feeds::follow))?;
    registry.register("following", logged_in(feeds::following))?;
    registry.register("unfollow", logged_in(feeds::unfollow))?;

    Ok(registry)
}

fn required<'c>(cmd: &'c Command, index: usize, usage: &str) -> GatorResult<&'c str> {
    cmd.arg(index)
        .ok_or_else(|| GatorError::MissingArgument(usage.to_string()))
}
