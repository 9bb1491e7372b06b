//! Authentication ports.

/// Claims recovered from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i32,
    pub exp: i64,
}

/// Token codec: signs a claims set into an opaque string and validates the
/// reverse direction. Implementations are pure given the configured secret.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-limited token for a user.
    fn issue(&self, user_id: i32) -> Result<String, AuthError>;

    /// Validate and decode a token. Must not panic on attacker-controlled
    /// input; every decode failure other than expiry is `InvalidToken`.
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Configured token lifetime, used for the session cookie's Max-Age.
    fn lifetime_seconds(&self) -> i64;
}

/// Password hashing service, consumed as a one-way hash/verify pair.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
