//! JWT session-token codec.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use board_core::ports::{AuthError, TokenClaims, TokenService};

/// Token codec configuration: the symmetric signing secret and the lifetime
/// of issued tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub lifetime_minutes: i64,
}

/// Wire-format claims. `sub` carries the user id as a string.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// HS256-signed session tokens.
///
/// Symmetric signing keeps session validation stateless: no store round-trip
/// is needed to check a token, and in exchange there is no server-side
/// revocation. Logout only clears the client cookie.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_minutes: i64,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            lifetime_minutes: config.lifetime_minutes,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.lifetime_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AuthError::InvalidToken
        })
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    // Tampered signature, malformed structure, bad base64,
                    // wrong algorithm: all normalized to one failure.
                    _ => AuthError::InvalidToken,
                }
            })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenClaims {
            user_id,
            exp: token_data.claims.exp,
        })
    }

    fn lifetime_seconds(&self) -> i64 {
        self.lifetime_minutes * 60
    }
}
