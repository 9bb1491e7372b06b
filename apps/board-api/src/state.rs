//! Application state - shared across all handlers.

use std::sync::Arc;

use board_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use board_infra::{
    Argon2PasswordService, JwtTokenService, SeaOrmPostRepository, SeaOrmUserRepository, connect,
};

use crate::config::AppConfig;
use crate::session::CookieConfig;

/// Shared application state. Everything here is constructed once from the
/// explicit configuration object; no component reads ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub cookie: CookieConfig,
}

impl AppState {
    /// Build the application state. The credential store is mandatory;
    /// startup fails without a reachable database.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database).await?;

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db)),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            cookie: config.cookie.clone(),
        })
    }
}
