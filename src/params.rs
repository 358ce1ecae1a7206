use std::env;
use std::path::PathBuf;

use multistart_args::{Coercer, FieldDescriptor, ParamSet, Schema, SchemaError, ValueKind};

use crate::error::Error;

pub(crate) const COMMAND: &str = "-f";
pub(crate) const PARAMETERS: &str = "-p";
pub(crate) const COUNT: &str = "-c";
pub(crate) const SCREEN: &str = "-s";

/// The parsed launcher configuration, extracted from a loaded parameter set.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct LauncherParams {
    pub command: String,
    pub parameters: String,
    pub count: usize,
    /// Target monitor index; negative selects the primary monitor.
    pub screen: i64,
}

/// The launcher's fixed schema.
pub(crate) fn schema() -> Result<Schema, SchemaError> {
    Schema::builder("multistart")
        .field(FieldDescriptor::new(COMMAND, ValueKind::Str).help("Command to be started."))
        .field(
            FieldDescriptor::new(PARAMETERS, ValueKind::Str)
                .default("")
                .help("Command parameters."),
        )
        .field(
            FieldDescriptor::new(COUNT, ValueKind::Int)
                .default("1")
                .help("Number of commands to be executed."),
        )
        .field(
            FieldDescriptor::new(SCREEN, ValueKind::Int)
                .default("-1")
                .help("Screen to display processes."),
        )
        .build()
}

/// Parse the raw argv tokens into a [`LauncherParams`].
pub(crate) fn load(tokens: &[&str]) -> Result<LauncherParams, Error> {
    let schema = schema()?;
    let coercer = Coercer::new(exe_dir().to_string_lossy());
    let params = ParamSet::new(&schema, &coercer)?.load(tokens)?;

    Ok(LauncherParams {
        command: params.str_value(COMMAND).unwrap_or_default().to_string(),
        parameters: params.str_value(PARAMETERS).unwrap_or_default().to_string(),
        // A negative count starts nothing.
        count: params.int_value(COUNT).unwrap_or(1).max(0) as usize,
        screen: params.int_value(SCREEN).unwrap_or(-1),
    })
}

/// The directory containing the running executable, for the `[EXEPATH]` substitution.
/// Falls back to the current directory when the executable path cannot be resolved.
fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
