//! SeaORM post repository.
//!
//! The `*_with_author` reads are an explicit two-step fetch: the post rows
//! first, then the author rows, joined in memory. No relational prefetch.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbConn, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use board_core::domain::{Post, PostDraft, PostWithAuthor, User};
use board_core::error::RepoError;
use board_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::map_db_err;

/// Post repository backed by the shared connection pool.
pub struct SeaOrmPostRepository {
    db: DbConn,
}

impl SeaOrmPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn load_author(&self, author_id: i32) -> Result<User, RepoError> {
        let author = UserEntity::find_by_id(author_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        // The FK guarantees an author row; a miss means the store is
        // inconsistent, not that the post is absent.
        author.map(Into::into).ok_or_else(|| {
            RepoError::Query(format!("author {} missing for existing post", author_id))
        })
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let author = self.load_author(model.author_id).await?;

        Ok(Some(PostWithAuthor {
            post: model.into(),
            author,
        }))
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let posts = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i32> = posts.iter().map(|p| p.author_id).collect();
        let authors: HashMap<i32, User> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        posts
            .into_iter()
            .map(|model| {
                let author = authors.get(&model.author_id).cloned().ok_or_else(|| {
                    RepoError::Query(format!(
                        "author {} missing for existing post",
                        model.author_id
                    ))
                })?;
                Ok(PostWithAuthor {
                    post: model.into(),
                    author,
                })
            })
            .collect()
    }

    async fn insert(&self, author_id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let active = post::ActiveModel {
            id: NotSet,
            author_id: Set(author_id),
            title: Set(draft.title),
            content: Set(draft.content),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update_content(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        active.title = Set(draft.title);
        active.content = Set(draft.content);
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
