//! Domain entities - the core business objects.

mod post;

mod user;

pub use post::{Post, PostDraft, PostWithAuthor};
pub use user::{NewUser, User};
