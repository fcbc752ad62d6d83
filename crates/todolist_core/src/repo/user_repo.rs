//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Email is the primary key; lookups are exact.
//! - Registering an existing email fails with `UserAlreadyExists`.

use crate::model::user::User;
use crate::repo::list_repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension};

/// Repository interface for user lookups.
pub trait UserRepository {
    /// Persists one new user.
    fn create_user(&self, user: &User) -> RepoResult<()>;
    /// Loads one user by exact email.
    fn get_user(&self, email: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        match self
            .conn
            .execute("INSERT INTO users (email) VALUES (?1);", [user.email.as_str()])
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let err = RepoError::from(err);
                match err {
                    RepoError::Db(db_err) if db_err.is_unique_violation() => {
                        Err(RepoError::UserAlreadyExists(user.email.clone()))
                    }
                    other => Err(other),
                }
            }
        }
    }

    fn get_user(&self, email: &str) -> RepoResult<Option<User>> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT email FROM users WHERE email = ?1;",
                [email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.map(|email| User { email }))
    }
}
