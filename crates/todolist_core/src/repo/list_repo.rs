//! List/item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for lists, their items and the sharing relation.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Items are returned in insertion order (`seq ASC`).
//! - `UNIQUE(list_uuid, text)` is the authoritative duplicate guard; a
//!   violation surfaces as `RepoError::DuplicateItem`, never as a raw DB error.
//! - Creating a list together with its first item is all-or-nothing.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use crate::model::list::{ListId, TodoList};
use crate::model::user::User;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const LIST_SELECT_SQL: &str = "SELECT
    lists.uuid AS uuid,
    lists.owner_email AS owner_email,
    (
        SELECT items.text
        FROM items
        WHERE items.list_uuid = lists.uuid
        ORDER BY items.seq ASC
        LIMIT 1
    ) AS name
FROM lists";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for list, item and user persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Target list does not exist.
    ListNotFound(ListId),
    /// No user is registered under this email.
    UserNotFound(String),
    /// A user with this email is already registered.
    UserAlreadyExists(String),
    /// The list already holds an item with identical text.
    DuplicateItem { list_id: ListId, text: String },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::UserNotFound(email) => write!(f, "user not found: {email}"),
            Self::UserAlreadyExists(email) => write!(f, "user already exists: {email}"),
            Self::DuplicateItem { list_id, .. } => {
                write!(f, "duplicate item text in list {list_id}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "list repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "list repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for lists, items and sharing.
pub trait ListRepository {
    /// Persists a new list and its first item in one transaction.
    fn create_list_with_item(&self, list: &TodoList, item: &Item) -> RepoResult<()>;
    /// Loads one list by id.
    fn get_list(&self, list_id: ListId) -> RepoResult<Option<TodoList>>;
    /// Inserts one item into an existing list.
    fn insert_item(&self, item: &Item) -> RepoResult<()>;
    /// Lists items of one list in insertion order.
    fn list_items(&self, list_id: ListId) -> RepoResult<Vec<Item>>;
    /// Adds a user to the list's share set. Re-sharing is a no-op.
    fn add_share(&self, list_id: ListId, email: &str) -> RepoResult<()>;
    /// Lists users the list is shared with, sorted by email.
    fn shared_with(&self, list_id: ListId) -> RepoResult<Vec<User>>;
    /// Lists lists owned by `email`, oldest first.
    fn lists_owned_by(&self, email: &str) -> RepoResult<Vec<TodoList>>;
    /// Lists lists shared with `email`, oldest share first.
    fn lists_shared_with(&self, email: &str) -> RepoResult<Vec<TodoList>>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["lists", "items", "list_shares"])?;
        Ok(Self { conn })
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create_list_with_item(&self, list: &TodoList, item: &Item) -> RepoResult<()> {
        if item.list_id != list.id {
            return Err(RepoError::InvalidData(format!(
                "item {} does not belong to list {}",
                item.id, list.id
            )));
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO lists (uuid, owner_email) VALUES (?1, ?2);",
            params![list.id.to_string(), list.owner.as_deref()],
        )?;
        insert_item_row(&tx, item)?;
        tx.commit()?;
        Ok(())
    }

    fn get_list(&self, list_id: ListId) -> RepoResult<Option<TodoList>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE lists.uuid = ?1;"))?;
        let mut rows = stmt.query([list_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_list_row(row)?));
        }
        Ok(None)
    }

    fn insert_item(&self, item: &Item) -> RepoResult<()> {
        insert_item_row(self.conn, item)
    }

    fn list_items(&self, list_id: ListId) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, list_uuid, text
             FROM items
             WHERE list_uuid = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([list_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn add_share(&self, list_id: ListId, email: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO list_shares (list_uuid, user_email) VALUES (?1, ?2);",
            params![list_id.to_string(), email],
        )?;
        Ok(())
    }

    fn shared_with(&self, list_id: ListId) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_email
             FROM list_shares
             WHERE list_uuid = ?1
             ORDER BY user_email ASC;",
        )?;
        let mut rows = stmt.query([list_id.to_string()])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(User {
                email: row.get(0)?,
            });
        }
        Ok(users)
    }

    fn lists_owned_by(&self, email: &str) -> RepoResult<Vec<TodoList>> {
        self.query_lists(
            &format!(
                "{LIST_SELECT_SQL}
                 WHERE lists.owner_email = ?1
                 ORDER BY lists.created_at ASC, lists.rowid ASC;"
            ),
            email,
        )
    }

    fn lists_shared_with(&self, email: &str) -> RepoResult<Vec<TodoList>> {
        self.query_lists(
            &format!(
                "{LIST_SELECT_SQL}
                 INNER JOIN list_shares ON list_shares.list_uuid = lists.uuid
                 WHERE list_shares.user_email = ?1
                 ORDER BY list_shares.created_at ASC, list_shares.rowid ASC;"
            ),
            email,
        )
    }
}

impl SqliteListRepository<'_> {
    fn query_lists(&self, sql: &str, email: &str) -> RepoResult<Vec<TodoList>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([email])?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }
        Ok(lists)
    }
}

fn insert_item_row(conn: &Connection, item: &Item) -> RepoResult<()> {
    let inserted = conn.execute(
        "INSERT INTO items (uuid, list_uuid, text) VALUES (?1, ?2, ?3);",
        params![
            item.id.to_string(),
            item.list_id.to_string(),
            item.text.as_str()
        ],
    );

    match inserted {
        Ok(_) => Ok(()),
        Err(err) => Err(map_item_insert_error(err.into(), item)),
    }
}

fn map_item_insert_error(err: DbError, item: &Item) -> RepoError {
    if err.is_unique_violation() {
        return RepoError::DuplicateItem {
            list_id: item.list_id,
            text: item.text.clone(),
        };
    }
    if is_foreign_key_violation(&err) {
        return RepoError::ListNotFound(item.list_id);
    }
    RepoError::Db(err)
}

fn is_foreign_key_violation(err: &DbError) -> bool {
    matches!(
        err,
        DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, _))
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<TodoList> {
    let uuid_text: String = row.get("uuid")?;
    Ok(TodoList {
        id: parse_uuid(&uuid_text, "lists.uuid")?,
        owner: row.get("owner_email")?,
        name: row.get("name")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let list_uuid_text: String = row.get("list_uuid")?;
    let id: ItemId = parse_uuid(&uuid_text, "items.uuid")?;
    let text: String = row.get("text")?;
    if text.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank text for item {id} in items.text"
        )));
    }

    Ok(Item {
        id,
        list_id: parse_uuid(&list_uuid_text, "items.list_uuid")?,
        text,
    })
}

fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

/// Verifies `conn` is migrated to the current schema and holds `tables`.
pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
