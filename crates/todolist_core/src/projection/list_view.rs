//! List/item projection and item write adapter.
//!
//! # Invariants
//! - `ListView::items` follows insertion order.
//! - Writes never bypass `ListService::add_item_to_list`; field errors carry
//!   the same fixed messages as the validation layer.

use crate::model::item::{Item, ItemId};
use crate::model::list::ListId;
use crate::repo::list_repo::ListRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::list_service::{ListService, ListServiceError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One item as exposed to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub list_id: ListId,
    pub text: String,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            list_id: item.list_id,
            text: item.text,
        }
    }
}

/// One list with its items, as exposed to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub id: ListId,
    pub items: Vec<ItemView>,
}

/// Inbound item resource: target list plus text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemWrite {
    pub list: ListId,
    pub text: String,
}

/// Field-level validation errors keyed by input field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
}

/// Failure of an item write through the projection.
#[derive(Debug)]
pub enum ItemWriteError {
    /// Input was refused; errors are addressed to fields.
    Invalid(FieldErrors),
    /// Write failed for a reason unrelated to the input.
    Failed(ListServiceError),
}

impl Display for ItemWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => {
                let messages = errors
                    .list
                    .iter()
                    .chain(errors.text.iter())
                    .map(String::as_str)
                    .collect::<Vec<_>>();
                write!(f, "invalid item write: {}", messages.join("; "))
            }
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ItemWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(_) => None,
            Self::Failed(err) => Some(err),
        }
    }
}

impl From<ListServiceError> for ItemWriteError {
    fn from(value: ListServiceError) -> Self {
        match value {
            ListServiceError::Rejected(rejected) => Self::Invalid(FieldErrors {
                text: vec![rejected.error.message().to_string()],
                ..FieldErrors::default()
            }),
            ListServiceError::ListNotFound(id) => Self::Invalid(FieldErrors {
                list: vec![format!("Invalid pk \"{id}\" - object does not exist.")],
                ..FieldErrors::default()
            }),
            other => Self::Failed(other),
        }
    }
}

impl<L: ListRepository, U: UserRepository> ListService<L, U> {
    /// Projects one list and its items.
    pub fn view_list(&self, list_id: ListId) -> Result<ListView, ListServiceError> {
        let items = self.list_items(list_id)?;
        Ok(ListView {
            id: list_id,
            items: items.into_iter().map(ItemView::from).collect(),
        })
    }

    /// Applies an inbound item resource to its target list.
    pub fn accept_item_write(&self, write: &ItemWrite) -> Result<ItemView, ItemWriteError> {
        let item = self.add_item_to_list(write.list, write.text.as_str())?;
        Ok(item.into())
    }
}
