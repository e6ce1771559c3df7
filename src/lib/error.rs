use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure modes when driving the external `shortcuts` tool.
///
/// Malformed output lines are not represented here: the CLI mixes decorative
/// text with records, so a line that doesn't parse is skipped, not an error.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("listing shortcuts failed with {status}")]
    Enumeration { status: ExitStatus },

    #[error("running shortcut failed with {status}")]
    Execution { status: ExitStatus },

    #[error("error reading command output: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ShortcutError>;
