//! SeaORM-backed credential store: connection setup, entities, and the
//! repository implementations behind the core ports.

mod connections;
pub mod entity;
mod post_repo;
mod user_repo;

pub use connections::{DatabaseConfig, connect};
pub use post_repo::SeaOrmPostRepository;
pub use user_repo::SeaOrmUserRepository;

use board_core::error::RepoError;
use sea_orm::DbErr;

/// Map a SeaORM error to a repository error, recognizing unique-constraint
/// violations so a duplicate insert racing past a pre-insert check surfaces
/// as a conflict rather than a generic query failure.
pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[cfg(test)]
mod tests;
