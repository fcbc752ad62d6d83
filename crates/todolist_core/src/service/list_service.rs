//! List/item use-case service.
//!
//! # Responsibility
//! - Run item validation before any write and persist accepted items.
//! - Resolve list and user references, reporting missing ones as lookup
//!   errors without partial side effects.
//! - Manage list sharing and owner/sharee list lookups.
//!
//! # Invariants
//! - Blank text never reaches storage.
//! - Rejected submissions are returned with the exact text the caller sent.
//! - A storage-level uniqueness conflict is reported as `DuplicateItem`, the
//!   same as the pre-write check.

use crate::model::item::{
    validate_item_text, Item, ItemTarget, ItemValidationError, RejectedItem,
};
use crate::model::list::{ListId, TodoList};
use crate::model::user::{User, UserValidationError};
use crate::repo::list_repo::{ListRepository, RepoError};
use crate::repo::user_repo::UserRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for list/item use-cases.
#[derive(Debug)]
pub enum ListServiceError {
    /// Submitted item text failed validation; carries the rejected input.
    Rejected(RejectedItem),
    /// Target list does not exist.
    ListNotFound(ListId),
    /// Referenced user does not exist.
    UserNotFound(String),
    /// Email input cannot identify a user.
    InvalidUser(UserValidationError),
    /// Registration attempted for an existing email.
    UserAlreadyExists(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ListServiceError {
    /// Validation failure kind, when this error is a rejected submission.
    pub fn validation_error(&self) -> Option<ItemValidationError> {
        match self {
            Self::Rejected(rejected) => Some(rejected.error),
            _ => None,
        }
    }
}

impl Display for ListServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(rejected) => write!(f, "{rejected}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::UserNotFound(email) => write!(f, "user not found: {email}"),
            Self::InvalidUser(err) => write!(f, "{err}"),
            Self::UserAlreadyExists(email) => write!(f, "user already exists: {email}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent list state: {details}"),
        }
    }
}

impl Error for ListServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::InvalidUser(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RejectedItem> for ListServiceError {
    fn from(value: RejectedItem) -> Self {
        Self::Rejected(value)
    }
}

impl From<UserValidationError> for ListServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}

impl From<RepoError> for ListServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ListNotFound(id) => Self::ListNotFound(id),
            RepoError::UserNotFound(email) => Self::UserNotFound(email),
            RepoError::UserAlreadyExists(email) => Self::UserAlreadyExists(email),
            RepoError::DuplicateItem { text, .. } => {
                Self::Rejected(RejectedItem::new(ItemValidationError::DuplicateItem, text))
            }
            other => Self::Repo(other),
        }
    }
}

pub type ListServiceResult<T> = Result<T, ListServiceError>;

/// List/item service facade over repository implementations.
pub struct ListService<L: ListRepository, U: UserRepository> {
    lists: L,
    users: U,
}

impl<L: ListRepository, U: UserRepository> ListService<L, U> {
    /// Creates a service using the provided repository implementations.
    pub fn new(lists: L, users: U) -> Self {
        Self { lists, users }
    }

    /// Registers a user by email.
    pub fn register_user(&self, email: &str) -> ListServiceResult<User> {
        let user = User::from_email(email)?;
        self.users.create_user(&user)?;
        info!("event=user_register module=service status=ok");
        Ok(user)
    }

    /// Loads one user by email.
    ///
    /// Surrounding whitespace is dropped, as on registration; the rest must
    /// match exactly.
    pub fn get_user(&self, email: &str) -> ListServiceResult<User> {
        let email = email.trim();
        self.users
            .get_user(email)?
            .ok_or_else(|| ListServiceError::UserNotFound(email.to_string()))
    }

    /// Creates a new list holding one item.
    ///
    /// # Contract
    /// - Only the blank check applies; a new list has nothing to collide with.
    /// - `owner`, when given, must be a registered user.
    /// - On any failure neither the list nor the item is persisted.
    pub fn create_list_with_item(
        &self,
        text: &str,
        owner: Option<&str>,
    ) -> ListServiceResult<TodoList> {
        let canonical = match validate_item_text(text, ItemTarget::NewList) {
            Ok(canonical) => canonical,
            Err(rejected) => {
                log_rejection("list_create", rejected.error);
                return Err(rejected.into());
            }
        };

        let owner = match owner {
            Some(email) => Some(self.get_user(email)?.email),
            None => None,
        };

        let list = TodoList::new(owner);
        let item = Item::new(list.id, canonical);
        self.lists.create_list_with_item(&list, &item)?;
        info!(
            "event=list_create module=service status=ok list_id={} owned={}",
            list.id,
            list.owner.is_some()
        );

        self.lists
            .get_list(list.id)?
            .ok_or(ListServiceError::InconsistentState(
                "created list not found in read-back",
            ))
    }

    /// Adds one item to an existing list.
    ///
    /// # Contract
    /// - Fails with `ListNotFound` before validating when the list is absent.
    /// - Applies the blank check, then the duplicate check against the
    ///   list's current items.
    /// - A uniqueness conflict raised by storage is reported as
    ///   `DuplicateItem` with the submitted text.
    pub fn add_item_to_list(&self, list_id: ListId, text: &str) -> ListServiceResult<Item> {
        self.get_list(list_id)?;
        let existing = self.lists.list_items(list_id)?;
        let canonical = match validate_item_text(text, ItemTarget::Existing(&existing)) {
            Ok(canonical) => canonical,
            Err(rejected) => {
                log_rejection("item_add", rejected.error);
                return Err(rejected.into());
            }
        };

        let item = Item::new(list_id, canonical);
        match self.lists.insert_item(&item) {
            Ok(()) => {}
            Err(RepoError::DuplicateItem { .. }) => {
                log_rejection("item_add", ItemValidationError::DuplicateItem);
                return Err(
                    RejectedItem::new(ItemValidationError::DuplicateItem, text).into(),
                );
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            "event=item_add module=service status=ok list_id={} item_id={}",
            list_id, item.id
        );
        Ok(item)
    }

    /// Loads one list by id.
    pub fn get_list(&self, list_id: ListId) -> ListServiceResult<TodoList> {
        self.lists
            .get_list(list_id)?
            .ok_or(ListServiceError::ListNotFound(list_id))
    }

    /// Lists items of one list in insertion order.
    pub fn list_items(&self, list_id: ListId) -> ListServiceResult<Vec<Item>> {
        self.get_list(list_id)?;
        Ok(self.lists.list_items(list_id)?)
    }

    /// Shares a list with a registered user.
    ///
    /// Sharing twice with the same user is a no-op. Returns the list so the
    /// caller can redirect to [`TodoList::absolute_url`].
    pub fn share_list(&self, list_id: ListId, sharee_email: &str) -> ListServiceResult<TodoList> {
        let list = self.get_list(list_id)?;
        let sharee = self.get_user(sharee_email)?;
        self.lists.add_share(list_id, sharee.email.as_str())?;
        info!("event=list_share module=service status=ok list_id={list_id}");
        Ok(list)
    }

    /// Lists users a list is shared with, sorted by email.
    pub fn shared_with(&self, list_id: ListId) -> ListServiceResult<Vec<User>> {
        self.get_list(list_id)?;
        Ok(self.lists.shared_with(list_id)?)
    }

    /// Lists all lists owned by a registered user.
    pub fn lists_for_owner(&self, owner_email: &str) -> ListServiceResult<Vec<TodoList>> {
        let owner = self.get_user(owner_email)?;
        Ok(self.lists.lists_owned_by(owner.email.as_str())?)
    }

    /// Lists all lists shared with a registered user.
    pub fn lists_shared_with(&self, email: &str) -> ListServiceResult<Vec<TodoList>> {
        let user = self.get_user(email)?;
        Ok(self.lists.lists_shared_with(user.email.as_str())?)
    }
}

fn log_rejection(event: &'static str, error: ItemValidationError) {
    let reason = match error {
        ItemValidationError::EmptyItem => "empty_item",
        ItemValidationError::DuplicateItem => "duplicate_item",
    };
    warn!("event={event} module=service status=rejected reason={reason}");
}
