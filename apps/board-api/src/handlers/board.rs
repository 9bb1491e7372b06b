//! Board handlers - post CRUD gated by ownership.

use actix_web::{HttpResponse, web};

use board_core::domain::PostDraft;
use board_shared::dto::{MessageResponse, PostRequest, PostResponse, PublicUser};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /board/posts - public
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_with_authors().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /board/posts - requires a valid session
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
    };
    draft.validate()?;

    let post = state.posts.insert(identity.user.id, draft).await?;

    // Re-read through the explicit join so the response embeds the author.
    // The insert has committed by now; a failed re-read is reported, not
    // hidden.
    let created = state
        .posts
        .find_with_author(post.id)
        .await?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created post".to_string()))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(created)))
}

/// GET /board/posts/{id} - public
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /board/posts/{id} - requires session + ownership
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
    };
    draft.validate()?;

    // Existence before ownership: a missing post is 404 for everyone.
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.is_authored_by(identity.user.id) {
        return Err(AppError::Forbidden(
            "Not authorized to update this post".to_string(),
        ));
    }

    let updated = state.posts.update_content(id, draft).await?;

    // The caller is the verified author, so the projection comes straight
    // from the identity.
    Ok(HttpResponse::Ok().json(PostResponse::new(updated, PublicUser::from(&identity.user))))
}

/// DELETE /board/posts/{id} - requires session + ownership
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.is_authored_by(identity.user.id) {
        return Err(AppError::Forbidden(
            "Not authorized to delete this post".to_string(),
        ));
    }

    state.posts.delete(id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
