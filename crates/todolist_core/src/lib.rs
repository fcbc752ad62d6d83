//! Core domain logic for shared to-do lists.
//! This crate is the single source of truth for list/item invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::item::{
    validate_item_text, Item, ItemId, ItemTarget, ItemValidationError, RejectedItem,
    DUPLICATE_ITEM_ERROR, EMPTY_ITEM_ERROR,
};
pub use model::list::{ListId, TodoList};
pub use model::user::{User, UserValidationError};
pub use projection::list_view::{FieldErrors, ItemView, ItemWrite, ItemWriteError, ListView};
pub use repo::list_repo::{ListRepository, RepoError, RepoResult, SqliteListRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use service::list_service::{ListService, ListServiceError, ListServiceResult};

/// Service type wired to SQLite repositories sharing one connection.
pub type SqliteListService<'conn> =
    ListService<SqliteListRepository<'conn>, SqliteUserRepository<'conn>>;

/// Builds a list service over one migrated connection.
pub fn sqlite_list_service(conn: &rusqlite::Connection) -> RepoResult<SqliteListService<'_>> {
    Ok(ListService::new(
        SqliteListRepository::try_new(conn)?,
        SqliteUserRepository::try_new(conn)?,
    ))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, sqlite_list_service};
    use crate::db::open_db_in_memory;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn sqlite_list_service_accepts_migrated_connection() {
        let conn = open_db_in_memory().expect("in-memory db");
        assert!(sqlite_list_service(&conn).is_ok());
    }

    #[test]
    fn sqlite_list_service_rejects_unmigrated_connection() {
        let conn = rusqlite::Connection::open_in_memory().expect("raw connection");
        assert!(sqlite_list_service(&conn).is_err());
    }
}
