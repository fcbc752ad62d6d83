//! To-do list domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another list.
//! - `owner`, when present, is fixed at creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one to-do list.
pub type ListId = Uuid;

/// A collection of items, optionally owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    /// Owner email. Anonymous lists have no owner.
    pub owner: Option<String>,
    /// Text of the first item added, used as the list's label.
    pub name: Option<String>,
}

impl TodoList {
    /// Creates an empty list with a generated stable ID.
    pub fn new(owner: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: None,
        }
    }

    /// Canonical location of this list, used as the redirect target after
    /// create/add/share.
    pub fn absolute_url(&self) -> String {
        format!("/lists/{}/", self.id)
    }

    /// Returns whether `email` owns this list.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner.as_deref() == Some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::TodoList;

    #[test]
    fn absolute_url_uses_list_id() {
        let list = TodoList::new(None);
        assert_eq!(list.absolute_url(), format!("/lists/{}/", list.id));
    }

    #[test]
    fn anonymous_list_has_no_owner() {
        let list = TodoList::new(None);
        assert!(!list.is_owned_by("a@b.com"));

        let owned = TodoList::new(Some("a@b.com".to_string()));
        assert!(owned.is_owned_by("a@b.com"));
    }
}
