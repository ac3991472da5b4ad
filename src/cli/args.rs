//! CLI argument definitions using clap
//!
//! Commands:
//! - ledger-orm tables --root <dir>
//! - ledger-orm schema --root <dir> <table>
//! - ledger-orm rows --root <dir> <table>
//! - ledger-orm verify --root <dir>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ledger-orm - inspect tables written by the file table store
#[derive(Parser, Debug)]
#[command(name = "ledger-orm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tables under a store root
    Tables {
        /// Store root directory
        #[arg(long, default_value = "./data")]
        root: PathBuf,
    },

    /// Print a table's column definitions
    Schema {
        /// Store root directory
        #[arg(long, default_value = "./data")]
        root: PathBuf,

        /// Table name
        table: String,
    },

    /// Print every row of a table
    Rows {
        /// Store root directory
        #[arg(long, default_value = "./data")]
        root: PathBuf,

        /// Table name
        table: String,
    },

    /// Verify the checksum of every table file
    Verify {
        /// Store root directory
        #[arg(long, default_value = "./data")]
        root: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let cli = Cli::try_parse_from(["ledger-orm", "rows", "--root", "/tmp/x", "Widget"]).unwrap();
        match cli.command {
            Command::Rows { root, table } => {
                assert_eq!(root, PathBuf::from("/tmp/x"));
                assert_eq!(table, "Widget");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_root() {
        let cli = Cli::try_parse_from(["ledger-orm", "tables"]).unwrap();
        match cli.command {
            Command::Tables { root } => assert_eq!(root, PathBuf::from("./data")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_schema_requires_table() {
        assert!(Cli::try_parse_from(["ledger-orm", "schema"]).is_err());
    }
}
