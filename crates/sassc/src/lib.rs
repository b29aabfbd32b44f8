//! The `sassc` command: compile one Sass file and print the result.
//!
//! Usage: `sassc <input-path> <output-path>`
//!
//! Prints the CSS on success, or the engine's JSON error report on failure,
//! and exits with the engine's status. The output path only names the
//! source map (`<output-path>.map`); nothing is written to disk.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use eyre::{Result, WrapErr};
use sassc_engine::{Engine, FileContext, STATUS_UNKNOWN_ERROR, SassOptions};

/// Exit status for a wrong number of arguments.
pub const USAGE_STATUS: i32 = 5;

/// Printed verbatim when the argument count is wrong.
///
/// Not valid JSON: the `status` key is missing its closing quote and the
/// message is unquoted. Callers have historically matched on this exact text.
pub const USAGE_DIAGNOSTIC: &str =
    "\n{\n  \"status: 5,\n  \"message\": Invalid number of parameters\n}\n";

/// Input and output paths from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Exactly two arguments after the program name, taken as opaque paths.
///
/// Arguments are OS strings: a path that is not valid UTF-8 is still a path.
pub fn parse_args(argv: &[OsString]) -> Option<Args> {
    match argv {
        [_program, input, output] => Some(Args {
            input_path: PathBuf::from(input),
            output_path: PathBuf::from(output),
        }),
        _ => None,
    }
}

/// Run the command and return the status to exit with.
///
/// Exactly one block of text is written to `out`.
pub fn run(argv: &[OsString], engine: &impl Engine, out: &mut impl Write) -> Result<i32> {
    let Some(args) = parse_args(argv) else {
        tracing::debug!(count = argv.len().saturating_sub(1), "wrong number of arguments");
        writeln!(out, "{USAGE_DIAGNOSTIC}").wrap_err("failed to write usage diagnostic")?;
        return Ok(USAGE_STATUS);
    };

    let options = SassOptions::for_file(args.input_path, args.output_path);
    tracing::debug!(
        input = %options.input_path.display(),
        output = %options.output_path.display(),
        source_map = ?options.source_map_file,
        "compiling"
    );

    let mut context = FileContext::new(options);
    let status = context.compile(engine);

    if status > 0 {
        let json = context.error_json().unwrap_or_default();
        writeln!(out, "{json}").wrap_err("failed to write error report")?;
    } else {
        let css = context.output_string().unwrap_or_default();
        writeln!(out, "{css}").wrap_err("failed to write CSS")?;
    }
    out.flush().wrap_err("failed to flush output")?;

    Ok(status)
}

/// Status for a finished [`run`]. Failures of the command itself (for
/// example stdout being closed) are logged and become
/// [`STATUS_UNKNOWN_ERROR`].
pub fn settle(result: Result<i32>) -> i32 {
    result.unwrap_or_else(|e| {
        tracing::error!("{e:?}");
        STATUS_UNKNOWN_ERROR
    })
}

/// Process exit code for a status.
pub fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(exit_byte(status))
}

/// Statuses that don't fit a byte saturate.
fn exit_byte(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(u8::MAX)
}
