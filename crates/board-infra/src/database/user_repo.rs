//! SeaORM user repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set,
};

use board_core::domain::{NewUser, User};
use board_core::error::RepoError;
use board_core::ports::UserRepository;

use super::entity::user::{self, Entity as UserEntity};
use super::map_db_err;

/// User repository backed by the shared connection pool.
pub struct SeaOrmUserRepository {
    db: DbConn,
}

impl SeaOrmUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active = user::ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            nickname: Set(new_user.nickname),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now().into()),
        };

        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}
