// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{CheckCommand, Command, ListCommand, RegisterCommand, ServeCommand, ShowCommand};
use crate::Result;
use crate::cli::{Args, Commands, ServeArgs};
use crate::config::AppConfig;

/// CommandRouter picks the Command for a parsed subcommand.
///
/// Without a subcommand the API server runs with configured defaults.
pub struct CommandRouter;

impl CommandRouter {
    pub fn route(args: Args, config: AppConfig) -> Result<Box<dyn Command>> {
        let command: Box<dyn Command> = match args.command {
            Some(Commands::Serve(serve)) => Box::new(ServeCommand::new(config, serve)),
            Some(Commands::Register(register)) => Box::new(RegisterCommand::new(config, register)),
            Some(Commands::Check(check)) => Box::new(CheckCommand::new(config, check)),
            Some(Commands::List) => Box::new(ListCommand::new(config)),
            Some(Commands::Show(show)) => Box::new(ShowCommand::new(config, show)),
            None => Box::new(ServeCommand::new(config, ServeArgs::default())),
        };

        tracing::debug!("Routing to {}", command.name());
        Ok(command)
    }
}
