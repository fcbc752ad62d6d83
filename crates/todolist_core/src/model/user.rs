//! User domain model.
//!
//! Users are identified by email only; credentials live outside the core.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A person who can own lists or receive shared lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Email input that cannot identify a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmail,
    MalformedEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be blank"),
            Self::MalformedEmail(value) => write!(f, "email is malformed: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Builds a user from raw email input.
    ///
    /// Surrounding whitespace is dropped; the remainder must look like
    /// `local@domain`. Case is preserved.
    pub fn from_email(email: &str) -> Result<Self, UserValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }

        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self {
                email: trimmed.to_string(),
            }),
            _ => Err(UserValidationError::MalformedEmail(trimmed.to_string())),
        }
    }
}
