//! Domain model for lists, items and users.
//!
//! # Responsibility
//! - Define the plain records manipulated by repositories and services.
//! - Own item submission validation, which needs no storage access.
//!
//! # Invariants
//! - Lists and items are identified by stable UUIDs.
//! - Users are identified by email.

pub mod item;
pub mod list;
pub mod user;
