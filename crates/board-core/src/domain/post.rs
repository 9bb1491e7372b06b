use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::error::DomainError;

/// Post entity - a message on the board.
///
/// The author is set at creation and never reassigned; `updated_at` is
/// refreshed on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Ownership check gating update and delete.
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }
}

/// Title and content of a post, as submitted for create or update.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub const MAX_TITLE_LEN: usize = 255;

    /// Reject empty titles/content and oversized titles before they reach
    /// the store.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::Validation("Title must not be empty".into()));
        }
        if self.title.chars().count() > Self::MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be at most {} characters",
                Self::MAX_TITLE_LEN
            )));
        }
        if self.content.is_empty() {
            return Err(DomainError::Validation("Content must not be empty".into()));
        }
        Ok(())
    }
}

/// A post joined with its author, produced by an explicit two-step fetch at
/// the repository boundary.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}
