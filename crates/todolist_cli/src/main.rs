//! Command-line front end for the to-do list core.
//!
//! # Responsibility
//! - Map one subcommand to one service operation.
//! - Print results as JSON on stdout; print fixed validation messages on
//!   stderr so they can be shown verbatim.

mod config;

use clap::Parser;
use config::{CliConfig, Command};
use log::error;
use serde_json::{json, Value};
use std::process::ExitCode;
use todolist_core::db::open_db;
use todolist_core::{
    default_log_level, init_logging, sqlite_list_service, ListServiceError, SqliteListService,
};

const EXIT_REJECTED: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    if let Some(log_dir) = config.log_dir.as_deref() {
        let level = config
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().as_str().to_string());
        if let Err(err) = init_logging(level.as_str(), log_dir) {
            eprintln!("todolist: {err}");
            return ExitCode::FAILURE;
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("todolist: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let service = match sqlite_list_service(&conn) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("todolist: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&service, config.command) {
        Ok(output) => {
            println!("{output:#}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn run(service: &SqliteListService<'_>, command: Command) -> Result<Value, ListServiceError> {
    let output = match command {
        Command::AddUser { email } => json!(service.register_user(&email)?),
        Command::NewList { text, owner } => {
            let list = service.create_list_with_item(&text, owner.as_deref())?;
            json!({ "url": list.absolute_url(), "list": service.view_list(list.id)? })
        }
        Command::AddItem { list_id, text } => {
            let item = service.add_item_to_list(list_id, &text)?;
            json!({ "item": item, "list": service.view_list(list_id)? })
        }
        Command::Show { list_id } => {
            let list = service.get_list(list_id)?;
            json!({
                "owner": list.owner,
                "shared_with": service.shared_with(list_id)?,
                "list": service.view_list(list_id)?,
            })
        }
        Command::Share { list_id, sharee } => {
            let list = service.share_list(list_id, &sharee)?;
            json!({ "url": list.absolute_url(), "shared_with": service.shared_with(list_id)? })
        }
        Command::MyLists { email } => json!(service.lists_for_owner(&email)?),
        Command::SharedWithMe { email } => json!(service.lists_shared_with(&email)?),
    };
    Ok(output)
}

fn report(err: &ListServiceError) -> ExitCode {
    if !matches!(
        err,
        ListServiceError::Rejected(_)
            | ListServiceError::ListNotFound(_)
            | ListServiceError::UserNotFound(_)
    ) {
        error!("event=cli_command module=cli status=error error={err}");
    }

    let (code, lines) = failure_report(err);
    for line in lines {
        eprintln!("{line}");
    }
    code
}

/// Exit code and stderr lines for a failed command.
///
/// Rejections lead with the fixed validation message so it can be shown
/// verbatim.
fn failure_report(err: &ListServiceError) -> (ExitCode, Vec<String>) {
    match err {
        ListServiceError::Rejected(rejected) => (
            ExitCode::from(EXIT_REJECTED),
            vec![
                rejected.error.message().to_string(),
                format!("submitted: {:?}", rejected.text),
            ],
        ),
        ListServiceError::ListNotFound(_) | ListServiceError::UserNotFound(_) => (
            ExitCode::from(EXIT_NOT_FOUND),
            vec![format!("todolist: {err}")],
        ),
        other => (ExitCode::FAILURE, vec![format!("todolist: {other}")]),
    }
}

#[cfg(test)]
mod tests {
    use super::{failure_report, report, run, EXIT_NOT_FOUND, EXIT_REJECTED};
    use crate::config::Command;
    use std::process::ExitCode;
    use todolist_core::db::open_db_in_memory;
    use todolist_core::{
        sqlite_list_service, ItemValidationError, ListServiceError, RejectedItem,
        DUPLICATE_ITEM_ERROR, EMPTY_ITEM_ERROR,
    };
    use uuid::Uuid;

    #[test]
    fn add_item_with_duplicate_text_is_rejected() {
        let conn = open_db_in_memory().expect("in-memory db");
        let service = sqlite_list_service(&conn).expect("service");
        let list = service
            .create_list_with_item("buy milk", None)
            .expect("list created");

        let err = run(
            &service,
            Command::AddItem {
                list_id: list.id,
                text: "buy milk".to_string(),
            },
        )
        .expect_err("duplicate must be rejected");

        match &err {
            ListServiceError::Rejected(rejected) => {
                assert_eq!(rejected.error, ItemValidationError::DuplicateItem);
                assert_eq!(rejected.text, "buy milk");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(report(&err), ExitCode::from(EXIT_REJECTED));
    }

    #[test]
    fn new_list_prints_url_and_items() {
        let conn = open_db_in_memory().expect("in-memory db");
        let service = sqlite_list_service(&conn).expect("service");

        let output = run(
            &service,
            Command::NewList {
                text: "buy milk".to_string(),
                owner: None,
            },
        )
        .expect("list created");

        let url = output["url"].as_str().expect("url string");
        assert!(url.starts_with("/lists/"));
        assert_eq!(output["list"]["items"][0]["text"], "buy milk");
    }

    #[test]
    fn rejection_report_leads_with_fixed_message() {
        let err = ListServiceError::Rejected(RejectedItem::new(
            ItemValidationError::EmptyItem,
            "  ",
        ));

        let (code, lines) = failure_report(&err);
        assert_eq!(code, ExitCode::from(EXIT_REJECTED));
        assert_eq!(lines[0], EMPTY_ITEM_ERROR);

        let duplicate = ListServiceError::Rejected(RejectedItem::new(
            ItemValidationError::DuplicateItem,
            "x",
        ));
        assert_eq!(failure_report(&duplicate).1[0], DUPLICATE_ITEM_ERROR);
    }

    #[test]
    fn missing_list_or_user_exits_with_not_found() {
        let conn = open_db_in_memory().expect("in-memory db");
        let service = sqlite_list_service(&conn).expect("service");

        let missing_list = run(
            &service,
            Command::Show {
                list_id: Uuid::new_v4(),
            },
        )
        .expect_err("list is missing");
        assert!(matches!(missing_list, ListServiceError::ListNotFound(_)));
        assert_eq!(report(&missing_list), ExitCode::from(EXIT_NOT_FOUND));

        let missing_user = run(
            &service,
            Command::MyLists {
                email: "missing@x.com".to_string(),
            },
        )
        .expect_err("user is missing");
        assert!(matches!(missing_user, ListServiceError::UserNotFound(_)));
        assert_eq!(report(&missing_user), ExitCode::from(EXIT_NOT_FOUND));
    }

    #[test]
    fn other_failures_exit_with_generic_failure() {
        let err = ListServiceError::InconsistentState("read-back missing");
        assert_eq!(failure_report(&err).0, ExitCode::FAILURE);
    }
}
