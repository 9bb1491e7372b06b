use chrono::{DateTime, Utc};
use serde::Serialize;

/// User entity - a registered account on the board.
///
/// `username` and `nickname` are each globally unique; the store enforces
/// this with unique constraints. The password hash never leaves the backend
/// (see `board_shared::dto::PublicUser` for the outward projection).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a user. The store assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub nickname: String,
    pub password_hash: String,
}
