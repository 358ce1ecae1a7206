use std::process::{Child, Command};

use tracing::debug;

use crate::error::Error;
use crate::params::LauncherParams;

/// Start one instance of the command.
///
/// The parameter text is handed to the process as a single raw argument string on
/// Windows (the launched program sees exactly what was typed); elsewhere it is split
/// on whitespace.
pub(crate) fn start(program: &str, parameters: &str) -> std::io::Result<Child> {
    let mut command = Command::new(program);

    if !parameters.is_empty() {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.raw_arg(parameters);
        }

        #[cfg(not(windows))]
        {
            command.args(parameters.split_whitespace());
        }
    }

    command.spawn()
}

/// Start `count` instances of the configured command.
pub(crate) fn start_all(params: &LauncherParams) -> Result<Vec<Child>, Error> {
    let mut children = Vec::with_capacity(params.count);

    for instance in 0..params.count {
        let child = start(&params.command, &params.parameters).map_err(|source| Error::Start {
            command: params.command.clone(),
            source,
        })?;
        debug!(instance, pid = child.id(), "started");
        children.push(child);
    }

    Ok(children)
}
