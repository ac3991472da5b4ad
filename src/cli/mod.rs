//! CLI module for ledger-orm
//!
//! Read-only inspection of a file table store:
//! - tables: list table names
//! - schema: print a table's columns
//! - rows: print a table's rows
//! - verify: check every table file's checksum

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{rows, run_command, schema, tables, verify};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};

use tracing_subscriber::EnvFilter;

/// Parse arguments, install logging and run the command.
///
/// Failures are also reported as a JSON error response on stdout.
pub fn run() -> CliResult<()> {
    init_logging();

    let cli = Cli::parse_args();
    let result = run_command(cli.command);
    if let Err(e) = &result {
        write_error(e.code_str(), e.message())?;
    }
    result
}

/// Stderr logging filtered by `RUST_LOG`, warnings by default
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
