//! HTTP handlers and route configuration.

mod auth;
mod board;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/token", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me)),
        )
        .service(
            web::scope("/board")
                .route("/posts", web::get().to(board::list_posts))
                .route("/posts", web::post().to(board::create_post))
                .route("/posts/{id}", web::get().to(board::get_post))
                .route("/posts/{id}", web::put().to(board::update_post))
                .route("/posts/{id}", web::delete().to(board::delete_post)),
        );
}
