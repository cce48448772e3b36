use std::collections::HashMap;

use tracing::debug;

use crate::dispatch::State;
use crate::domain::Command;
use crate::errors::{GatorError, GatorResult};

pub trait CommandHandler {
    fn handle(&self, state: &mut State<'_>, cmd: &Command) -> GatorResult<()>;
}

impl<F> CommandHandler for F
where
    F: Fn(&mut State<'_>, &Command) -> GatorResult<()>,
{
    fn handle(&self, state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
        self(state, cmd)
    }
}

/// Name-to-handler table, filled once at startup
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`. A second registration of the same
    /// name is refused instead of replacing the first.
    pub fn register<H>(&mut self, name: &str, handler: H) -> GatorResult<()>
    where
        H: CommandHandler + 'static,
    {
        if self.handlers.contains_key(name) {
            return Err(GatorError::DuplicateCommand(name.to_string()));
        }
        self.handlers.insert(name.to_string(), Box::new(handler));
        Ok(())
    }

    /// Sorted command names, listed in help output
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn run(&self, state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
        let handler = self
            .handlers
            .get(&cmd.name)
            .ok_or_else(|| GatorError::CommandNotFound(cmd.name.clone()))?;

        debug!(command = %cmd.name, args = cmd.args.len(), "dispatching");
        handler.handle(state, cmd)
    }
}
