//! Table-driven subcommand dispatch
//!
//! A command group is a static, ordered list of descriptors. Names match
//! case-insensitively and the first match wins; anything else prints the
//! group's usage listing.

use std::fmt::Write as _;

use tracing::debug;

use crate::cli::error::CliError;
use crate::cli::output::Session;

/// Handler contract: residual arguments in, process exit code out.
pub type Handler = fn(&mut Session<'_>, &[String]) -> i32;

#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: Handler,
}

pub struct CommandTable {
    /// Group label shown in usage output, e.g. `DIRTY`
    pub group: &'static str,
    pub commands: &'static [CommandDescriptor],
}

impl CommandTable {
    pub fn find(&self, name: &str) -> Option<&'static CommandDescriptor> {
        self.commands
            .iter()
            .find(|cmd| cmd.name.eq_ignore_ascii_case(name))
    }

    /// Run the handler named by `args[0]` with the remaining arguments.
    pub fn dispatch(&self, session: &mut Session<'_>, args: &[String]) -> i32 {
        let command = args.split_first();
        if let Some((name, rest)) = command {
            if let Some(cmd) = self.find(name) {
                debug!("dispatch: {} {} {:?}", self.group, cmd.name, rest);
                return (cmd.handler)(session, rest);
            }
        }

        let name = command.map(|(name, _)| name.as_str());
        session.error(self.usage(name).trim_end());
        session.exit_status(&Err(CliError::UnknownCommand(name.map(String::from))))
    }

    /// Usage listing, led by the offending name when one was given.
    pub fn usage(&self, command: Option<&str>) -> String {
        let mut text = String::new();
        if let Some(command) = command {
            writeln!(text, "Unhandled {} command: {}", self.group, command).ok();
        }
        writeln!(text, "---- Handled {} commands ----\n", self.group).ok();
        for cmd in self.commands {
            writeln!(text, "{}\t{}", cmd.name, cmd.description).ok();
        }
        text
    }
}
