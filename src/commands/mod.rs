// Commands module - Command Pattern implementation
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

mod command;
mod context;
mod router;

// Individual command implementations
mod check;
mod list;
mod register;
mod serve;

pub use command::Command;
pub use context::build_monitor;
pub use router::CommandRouter;

pub use check::CheckCommand;
pub use list::{ListCommand, ShowCommand};
pub use register::RegisterCommand;
pub use serve::ServeCommand;
