use clap::{CommandFactory, FromArgMatches, Parser};

use crate::domain::Command;

/// Command names are resolved by the dispatcher, not by clap, so an
/// unknown name still reaches the registry and is reported there.
#[derive(Parser)]
#[command(name = "gator")]
#[command(about = "RSS blog aggregator")]
#[command(version)]
pub struct Cli {
    /// Command to run
    pub command: String,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Clap command whose help lists `commands`
    pub fn command_listing(commands: &[&str]) -> clap::Command {
        Self::command().after_help(format!("Commands:\n  {}", commands.join("\n  ")))
    }

    /// Parse process arguments. Help output lists `commands`.
    pub fn parse_listing(commands: &[&str]) -> Self {
        let matches = Self::command_listing(commands).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn into_command(self) -> Command {
        Command::new(self.command, self.args)
    }
}
