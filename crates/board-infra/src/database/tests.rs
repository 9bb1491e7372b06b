use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use board_core::domain::{NewUser, PostDraft};
use board_core::error::RepoError;
use board_core::ports::{PostRepository, UserRepository};

use super::entity::{post, user};
use super::{SeaOrmPostRepository, SeaOrmUserRepository};

fn user_model(id: i32, username: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_owned(),
        nickname: username.to_owned(),
        password_hash: "$argon2id$hash".to_owned(),
        created_at: Utc::now().into(),
    }
}

fn post_model(id: i32, author_id: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_model() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 7)]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let post = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(post.id, 1);
    assert_eq!(post.author_id, 7);
    assert_eq!(post.title, "Test Post");
}

#[tokio::test]
async fn find_with_author_fetches_post_then_author() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 7)]])
        .append_query_results([vec![user_model(7, "alice")]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let joined = repo.find_with_author(1).await.unwrap().unwrap();
    assert_eq!(joined.post.id, 1);
    assert_eq!(joined.author.id, 7);
    assert_eq!(joined.author.username, "alice");
}

#[tokio::test]
async fn find_with_author_absent_post_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    assert!(repo.find_with_author(99).await.unwrap().is_none());
}

#[tokio::test]
async fn list_with_authors_joins_in_memory() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 7), post_model(2, 7)]])
        .append_query_results([vec![user_model(7, "alice")]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let posts = repo.list_with_authors().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author.username == "alice"));
}

#[tokio::test]
async fn insert_user_returns_created_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(1, "alice")]])
        .into_connection();

    let repo = SeaOrmUserRepository::new(db);

    let created = repo
        .insert(NewUser {
            username: "alice".into(),
            nickname: "alice".into(),
            password_hash: "$argon2id$hash".into(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.username, "alice");
}

#[tokio::test]
async fn insert_user_unique_violation_is_constraint() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"users_username_key\"".to_owned(),
        ))])
        .into_connection();

    let repo = SeaOrmUserRepository::new(db);

    let result = repo
        .insert(NewUser {
            username: "alice".into(),
            nickname: "alice".into(),
            password_hash: "$argon2id$hash".into(),
        })
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    assert!(matches!(repo.delete(99).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn delete_existing_post_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    assert!(repo.delete(1).await.is_ok());
}

#[tokio::test]
async fn update_content_refreshes_updated_at() {
    let before = post_model(1, 7);
    let mut after = before.clone();
    after.title = "Hi2".to_owned();
    after.content = "Body2".to_owned();
    after.updated_at = (Utc::now() + chrono::TimeDelta::seconds(5)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![before.clone()]])
        .append_query_results([vec![after]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let updated = repo
        .update_content(
            1,
            PostDraft {
                title: "Hi2".into(),
                content: "Body2".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Hi2");
    assert!(updated.updated_at > Into::<chrono::DateTime<Utc>>::into(before.updated_at));
}
