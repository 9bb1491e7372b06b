//! Application configuration loaded from environment variables.
//!
//! Built once at startup into an explicit object and passed into state
//! construction; core logic never reads the environment itself.

use std::env;

use actix_web::cookie::SameSite;
use anyhow::Context;

use board_infra::{DatabaseConfig, JwtConfig};

use crate::session::CookieConfig;

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        let secret = env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        if secret == DEFAULT_SECRET {
            tracing::warn!("Using default signing secret. Set SECRET_KEY for production use.");
        }

        let jwt = JwtConfig {
            secret,
            // 7 days
            lifetime_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60 * 24 * 7),
        };

        let cookie = CookieConfig {
            name: env::var("COOKIE_NAME").unwrap_or_else(|_| "session".to_string()),
            domain: env::var("COOKIE_DOMAIN").ok(),
            secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            same_site: parse_same_site(env::var("COOKIE_SAMESITE").ok().as_deref()),
        };

        Ok(Self {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "Board API".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt,
            cookie,
        })
    }
}

fn parse_same_site(value: Option<&str>) -> SameSite {
    match value {
        Some(v) if v.eq_ignore_ascii_case("strict") => SameSite::Strict,
        Some(v) if v.eq_ignore_ascii_case("none") => SameSite::None,
        _ => SameSite::Lax,
    }
}
