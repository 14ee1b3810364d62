use async_trait::async_trait;
use tracing::instrument;

use crate::{models::users::User, Error, Result};

use super::SqliteRepo;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
    async fn count_users(&self) -> Result<i64>;
}

#[async_trait]
impl UserRepository for SqliteRepo {
    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password FROM users WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(user_found = user.is_some(), "User query completed");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(user_found = user.is_some(), "User query completed");
        Ok(user)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                tracing::info!(username, "Signup rejected, username taken");
                Error::Conflict("Username already exists".to_string())
            }
            other => Error::from(other),
        })?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn count_users(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = SqliteRepo::in_memory().await.unwrap();
        repo.create_user("alice", "hash-1").await.unwrap();

        let second = repo.create_user("alice", "hash-2").await;
        assert!(matches!(second, Err(Error::Conflict(_))));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lookups_by_id_and_username_agree() {
        let repo = SqliteRepo::in_memory().await.unwrap();
        let created = repo.create_user("bob", "hash").await.unwrap();

        let by_id = repo.get_user(created.id).await.unwrap();
        let by_name = repo.find_by_username("bob").await.unwrap();
        assert_eq!(by_id, Some(created.clone()));
        assert_eq!(by_name, Some(created));
        assert_eq!(repo.find_by_username("nobody").await.unwrap(), None);
    }
}
