//! Authentication handlers.

use actix_web::{HttpResponse, web};

use board_core::domain::NewUser;
use board_core::error::RepoError;
use board_shared::dto::{LoginRequest, MessageResponse, PublicUser, RegisterRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::session;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.username.is_empty() || req.username.chars().count() > 50 {
        return Err(AppError::BadRequest(
            "Username must be 1-50 characters".to_string(),
        ));
    }
    if req.nickname.is_empty() || req.nickname.chars().count() > 50 {
        return Err(AppError::BadRequest(
            "Nickname must be 1-50 characters".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }

    // Ordered uniqueness checks: username first, then nickname, so the
    // caller gets a precise message per conflicting field.
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already registered".to_string()));
    }
    if state.users.find_by_nickname(&req.nickname).await?.is_some() {
        return Err(AppError::Conflict("Nickname already registered".to_string()));
    }

    // Hash the password before storing
    let password_hash = state
        .passwords
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The store's unique constraints stay authoritative: a duplicate insert
    // racing past the checks above comes back as a constraint violation,
    // reported as the same conflict.
    let user = state
        .users
        .insert(NewUser {
            username: req.username,
            nickname: req.nickname,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => {
                AppError::Conflict("Username or nickname already registered".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(PublicUser::from(user)))
}

/// POST /auth/token
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Unknown username and wrong password produce the same failure; no
    // account enumeration through the login path.
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = session::session_cookie(&state.cookie, &token, state.tokens.lifetime_seconds());

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("Successfully logged in")))
}

/// POST /auth/logout
///
/// Clears the client-held cookie. The token itself stays valid until its
/// natural expiry; there is no server-side revocation.
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session::removal_cookie(&state.cookie))
        .json(MessageResponse::new("Successfully logged out"))
}

/// GET /auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PublicUser::from(identity.user)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    use board_core::ports::{PasswordService, TokenService};
    use board_infra::Argon2PasswordService;
    use board_infra::database::entity::user;

    use crate::handlers::configure_routes;
    use crate::handlers::test_support::{state_over, token_service, user_row};

    macro_rules! spawn_app {
        ($db:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state_over($db)))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn register_duplicate_username_is_400_with_field_message() {
        // Username lookup finds an existing row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "alice", "$hash")]])
            .into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice", "nickname": "al", "password": "pw123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Username already registered");
    }

    #[actix_web::test]
    async fn register_duplicate_nickname_is_400_with_field_message() {
        // Username free, nickname taken.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![user_row(1, "bob", "$hash")]])
            .into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice", "nickname": "bob", "password": "pw123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Nickname already registered");
    }

    #[actix_web::test]
    async fn register_returns_public_projection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![user_row(1, "alice", "$argon2id$hash")]])
            .into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice", "nickname": "alice", "password": "pw123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn login_sets_bearer_session_cookie() {
        let hash = Argon2PasswordService::new().hash("pw123").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "alice", &hash)]])
            .into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(json!({"username": "alice", "password": "pw123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie set");
        assert!(cookie.value().starts_with("Bearer "));
        assert_eq!(cookie.http_only(), Some(true));

        // The carried token resolves back to the user.
        let token = cookie.value().trim_start_matches("Bearer ").to_string();
        let claims = token_service().validate(&token).unwrap();
        assert_eq!(claims.user_id, 1);
    }

    #[actix_web::test]
    async fn login_failures_are_uniform_401s() {
        let hash = Argon2PasswordService::new().hash("pw123").unwrap();

        // Unknown username.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let app = spawn_app!(db);
        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(json!({"username": "nobody", "password": "pw123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let unknown_user: serde_json::Value = test::read_body_json(resp).await;

        // Known username, wrong password.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "alice", &hash)]])
            .into_connection();
        let app = spawn_app!(db);
        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(json!({"username": "alice", "password": "wrong"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let wrong_password: serde_json::Value = test::read_body_json(resp).await;

        assert_eq!(unknown_user, wrong_password);
    }

    #[actix_web::test]
    async fn logout_clears_cookie() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::post().uri("/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie set");
        assert_eq!(cookie.value(), "");
    }

    #[actix_web::test]
    async fn me_without_cookie_is_401() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = spawn_app!(db);

        let req = test::TestRequest::get().uri("/auth/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn me_with_valid_cookie_returns_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "alice", "$hash")]])
            .into_connection();
        let app = spawn_app!(db);

        let token = token_service().issue(1).unwrap();
        let req = test::TestRequest::get()
            .uri("/auth/me")
            .cookie(actix_web::cookie::Cookie::new(
                "session",
                format!("Bearer {token}"),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn me_with_token_for_deleted_user_is_401() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let app = spawn_app!(db);

        let token = token_service().issue(99).unwrap();
        let req = test::TestRequest::get()
            .uri("/auth/me")
            .cookie(actix_web::cookie::Cookie::new(
                "session",
                format!("Bearer {token}"),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
