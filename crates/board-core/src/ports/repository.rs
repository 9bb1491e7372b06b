use async_trait::async_trait;

use crate::domain::{NewUser, Post, PostDraft, PostWithAuthor, User};
use crate::error::RepoError;

/// User repository - the credential store's user side.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its unique id.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    /// Find a user by its unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by its unique nickname.
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A unique-constraint violation (duplicate username
    /// or nickname racing past the pre-insert checks) surfaces as
    /// `RepoError::Constraint`.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
///
/// The `*_with_author` methods are the explicit fetch-then-join interface:
/// the post row is loaded first, then its author, with no implicit prefetch.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by id, without its author.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Find a post by id together with its author.
    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// List all posts, each with its author.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// Insert a new post owned by `author_id`.
    async fn insert(&self, author_id: i32, draft: PostDraft) -> Result<Post, RepoError>;

    /// Replace a post's title and content, refreshing `updated_at`.
    async fn update_content(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError>;

    /// Delete a post. `RepoError::NotFound` if no row was affected.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
