//! List item domain model and submission validation.
//!
//! # Responsibility
//! - Define the `Item` record owned by exactly one list.
//! - Validate submitted item text before any persistence happens.
//!
//! # Invariants
//! - Persisted `text` is never blank.
//! - `(list_id, text)` is unique; comparison is exact and case-sensitive.
//! - Validation is pure: it never touches storage.

use crate::model::list::ListId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// User-facing message for blank submissions.
pub const EMPTY_ITEM_ERROR: &str = "You can't have an empty list item";
/// User-facing message for text already present in the target list.
pub const DUPLICATE_ITEM_ERROR: &str = "You've already got this in your list";

/// Stable identifier for one list item.
pub type ItemId = Uuid;

/// One text entry belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Owning list. Never reassigned after creation.
    pub list_id: ListId,
    pub text: String,
}

impl Item {
    /// Creates an item with a generated stable ID.
    ///
    /// Does not validate `text`; callers go through [`validate_item_text`].
    pub fn new(list_id: ListId, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            text: text.into(),
        }
    }
}

/// Reason an item submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemValidationError {
    /// Text is empty or whitespace-only.
    EmptyItem,
    /// Target list already holds an item with identical text.
    DuplicateItem,
}

impl ItemValidationError {
    /// Fixed message shown verbatim next to the input field.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyItem => EMPTY_ITEM_ERROR,
            Self::DuplicateItem => DUPLICATE_ITEM_ERROR,
        }
    }
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ItemValidationError {}

/// A refused submission paired with the text the caller sent.
///
/// `text` is kept byte-for-byte as submitted so the form can be redisplayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedItem {
    pub error: ItemValidationError,
    pub text: String,
}

impl RejectedItem {
    pub fn new(error: ItemValidationError, text: impl Into<String>) -> Self {
        Self {
            error,
            text: text.into(),
        }
    }
}

impl Display for RejectedItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl Error for RejectedItem {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Where a submitted item is headed.
#[derive(Debug, Clone, Copy)]
pub enum ItemTarget<'a> {
    /// A list that will be created together with this item.
    NewList,
    /// An existing list, given by its current items.
    Existing(&'a [Item]),
}

/// Validates submitted item text against the target list.
///
/// Rules, in order:
/// 1. Blank text (empty after trim) is rejected with `EmptyItem`.
/// 2. For existing lists, text equal to a current item is rejected with
///    `DuplicateItem`.
///
/// Returns the canonical text to persist: the submission without surrounding
/// whitespace. Duplicate detection compares that canonical form.
pub fn validate_item_text(text: &str, target: ItemTarget<'_>) -> Result<String, RejectedItem> {
    let canonical = text.trim();
    if canonical.is_empty() {
        return Err(RejectedItem::new(ItemValidationError::EmptyItem, text));
    }

    if let ItemTarget::Existing(items) = target {
        if items.iter().any(|item| item.text == canonical) {
            return Err(RejectedItem::new(ItemValidationError::DuplicateItem, text));
        }
    }

    Ok(canonical.to_string())
}
