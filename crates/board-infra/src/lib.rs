//! # Board Infrastructure
//!
//! Concrete implementations of the ports defined in `board-core`:
//! SeaORM-backed repositories, the JWT session-token codec, and the Argon2
//! password hasher.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, SeaOrmPostRepository, SeaOrmUserRepository, connect};
