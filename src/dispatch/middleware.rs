use tracing::debug;

use crate::dispatch::{CommandHandler, State};
use crate::domain::{Command, User};
use crate::errors::{GatorError, GatorResult};

/// A handler that needs the acting user resolved before it runs
pub trait UserHandler {
    fn handle(&self, state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()>;
}

impl<F> UserHandler for F
where
    F: Fn(&mut State<'_>, &Command, &User) -> GatorResult<()>,
{
    fn handle(&self, state: &mut State<'_>, cmd: &Command, user: &User) -> GatorResult<()> {
        self(state, cmd, user)
    }
}

/// Adapts a [`UserHandler`] to the plain [`CommandHandler`] shape the registry stores
pub struct LoggedIn<H> {
    handler: H,
}

pub fn logged_in<H: UserHandler>(handler: H) -> LoggedIn<H> {
    LoggedIn { handler }
}

impl<H: UserHandler> CommandHandler for LoggedIn<H> {
    fn handle(&self, state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
        let user = resolve_current_user(state).map_err(|e| GatorError::NotLoggedIn(Box::new(e)))?;
        debug!(user = %user.name, command = %cmd.name, "resolved current user");
        self.handler.handle(state, cmd, &user)
    }
}

/// Look up the configured current user in the store
pub fn resolve_current_user(state: &State<'_>) -> GatorResult<User> {
    let name = state.config.current_user_name.as_str();
    state
        .store
        .users
        .get_by_name(name)?
        .ok_or_else(|| GatorError::UserNotFound(name.to_string()))
}
