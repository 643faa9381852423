//! Handler output and exit-status resolution
//!
//! Handlers write through a [`Session`] instead of the process streams so
//! their output can be captured.

use std::fmt::Display;
use std::io::Write;

use tracing::debug;

use crate::cli::error::CliResult;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Per-invocation state handed to every command handler.
pub struct Session<'a> {
    pub container: &'a ServiceContainer,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Session<'a> {
    pub fn new(
        container: &'a ServiceContainer,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self {
            container,
            out,
            err,
        }
    }

    /// Print plain output to stdout
    pub fn info(&mut self, msg: &(impl Display + ?Sized)) {
        writeln!(self.out, "{}", msg).ok();
    }

    /// Print diagnostic to stderr
    pub fn error(&mut self, msg: &(impl Display + ?Sized)) {
        writeln!(self.err, "{}", msg).ok();
    }

    /// Exit code for `result` under the configured policy.
    pub fn exit_status(&self, result: &CliResult<()>) -> i32 {
        let strict = match result {
            Ok(()) => exitcode::OK,
            Err(e) => e.exit_code(),
        };
        self.container.settings.exit_codes.resolve(strict)
    }

    /// Report a handler result on stderr and turn it into an exit code.
    pub fn finish(&mut self, result: CliResult<()>) -> i32 {
        if let Err(e) = &result {
            debug!("command failed: {e:?}");
            self.error(&e.diagnostic());
        }
        self.exit_status(&result)
    }
}
