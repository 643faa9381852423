//! Command groups and their handlers

use tracing::{debug, instrument};

use crate::cli::dispatch::{CommandDescriptor, CommandTable};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output::Session;
use crate::domain::{VolumeDesignator, EXAMPLE_DESIGNATOR};

/// Top-level groups of the `fsutil` binary.
pub static FSUTIL_COMMANDS: CommandTable = CommandTable {
    group: "FSUTIL",
    commands: &[CommandDescriptor {
        name: "dirty",
        description: "Manipulate the dirty bit",
        handler: dirty_main,
    }],
};

pub static DIRTY_COMMANDS: CommandTable = CommandTable {
    group: "DIRTY",
    commands: &[
        CommandDescriptor {
            name: "query",
            description: "Show the dirty bit",
            handler: query_main,
        },
        CommandDescriptor {
            name: "set",
            description: "Set the dirty bit",
            handler: set_main,
        },
    ],
};

pub fn fsutil_main(session: &mut Session<'_>, args: &[String]) -> i32 {
    FSUTIL_COMMANDS.dispatch(session, args)
}

pub fn dirty_main(session: &mut Session<'_>, args: &[String]) -> i32 {
    DIRTY_COMMANDS.dispatch(session, args)
}

#[instrument(skip(session))]
fn query_main(session: &mut Session<'_>, args: &[String]) -> i32 {
    let result = query(session, args);
    session.finish(result)
}

fn query(session: &mut Session<'_>, args: &[String]) -> CliResult<()> {
    let Some(raw) = args.first() else {
        return Err(CliError::Usage(format!(
            "Usage: fsutil dirty query <volume>\n\tFor example: fsutil dirty query {}",
            EXAMPLE_DESIGNATOR
        )));
    };
    let volume = VolumeDesignator::parse(raw)?;

    let report = session.container.dirty_service().query(&volume)?;
    debug!("query: {:?}", report);
    session.info(&report);
    Ok(())
}

// TODO: mark the volume dirty with FSCTL_MARK_VOLUME_DIRTY once writes are allowed
#[instrument(skip(session))]
fn set_main(session: &mut Session<'_>, args: &[String]) -> i32 {
    session.finish(Err(CliError::NotImplemented))
}
