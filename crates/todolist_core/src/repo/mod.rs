//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`ListNotFound`, `DuplicateItem`)
//!   in addition to DB transport errors.
//! - Repositories refuse connections that are not fully migrated.

pub mod list_repo;
pub mod user_repo;
