//! Identity resolution: turns a carried session cookie into an
//! authenticated user, or a precise failure.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use board_core::domain::User;
use board_core::ports::AuthError;
use board_shared::ErrorResponse;

use crate::session;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

/// Why resolution failed. The variants are distinct internally (and logged),
/// but every authentication failure renders the same 401 response so a
/// caller cannot probe which sub-check rejected it.
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    #[error("no session cookie")]
    Missing,

    #[error("invalid token")]
    Invalid,

    #[error("expired token")]
    Expired,

    #[error("token subject no longer exists")]
    UserGone,

    #[error("store failure during resolution: {0}")]
    Store(String),
}

impl actix_web::ResponseError for AuthFailure {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthFailure::Store(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match self {
            AuthFailure::Store(detail) => {
                tracing::error!("Identity resolution store failure: {}", detail);
                ErrorResponse::internal_error()
            }
            // One body for every authentication failure.
            other => {
                tracing::debug!("Authentication rejected: {}", other);
                ErrorResponse::unauthorized()
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthFailure;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("AppState not found in app data");
                    AuthFailure::Store("server state not configured".to_string())
                })?;

            let raw = session::extract(&req, &state.cookie.name).ok_or(AuthFailure::Missing)?;

            let claims = state.tokens.validate(&raw).map_err(|e| match e {
                AuthError::TokenExpired => AuthFailure::Expired,
                _ => AuthFailure::Invalid,
            })?;

            let user = state
                .users
                .find_by_id(claims.user_id)
                .await
                .map_err(|e| AuthFailure::Store(e.to_string()))?
                // Deleted after the token was issued; the token carries no
                // authority anymore.
                .ok_or(AuthFailure::UserGone)?;

            Ok(Identity { user })
        })
    }
}
