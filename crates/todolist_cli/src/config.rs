//! Command-line configuration.
//!
//! Every option can also be set through a `TODOLIST_*` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "todolist.sqlite3";

/// `todolist` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "todolist", about = "Manage shared to-do lists", version)]
pub struct CliConfig {
    /// SQLite database file.
    #[arg(long = "db", env = "TODOLIST_DB", value_name = "path", default_value = DEFAULT_DB_FILE_NAME)]
    pub db_path: PathBuf,
    /// Log level: trace|debug|info|warn|error. Defaults per build mode.
    #[arg(long = "log-level", env = "TODOLIST_LOG_LEVEL", value_name = "level")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long = "log-dir", env = "TODOLIST_LOG_DIR", value_name = "dir")]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a user by email.
    AddUser { email: String },
    /// Start a new list with its first item.
    NewList {
        text: String,
        /// Owner email; the list is anonymous when omitted.
        #[arg(long)]
        owner: Option<String>,
    },
    /// Add an item to an existing list.
    AddItem { list_id: Uuid, text: String },
    /// Print a list with its items.
    Show { list_id: Uuid },
    /// Share a list with a registered user.
    Share { list_id: Uuid, sharee: String },
    /// Print lists owned by a user.
    MyLists { email: String },
    /// Print lists shared with a user.
    SharedWithMe { email: String },
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, Command};
    use clap::Parser;

    #[test]
    fn parses_new_list_with_owner() {
        let config = CliConfig::try_parse_from([
            "todolist",
            "--db",
            "/tmp/lists.sqlite3",
            "new-list",
            "buy milk",
            "--owner",
            "a@b.com",
        ])
        .expect("arguments should parse");

        assert_eq!(config.db_path.to_str(), Some("/tmp/lists.sqlite3"));
        match config.command {
            Command::NewList { text, owner } => {
                assert_eq!(text, "buy milk");
                assert_eq!(owner.as_deref(), Some("a@b.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_list_id() {
        assert!(CliConfig::try_parse_from(["todolist", "show", "not-a-uuid"]).is_err());
    }
}
