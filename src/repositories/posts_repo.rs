use async_trait::async_trait;

use crate::{models::posts::Post, Error, Result};

use super::SqliteRepo;

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn get_post(&self, post_id: i64) -> Result<Option<Post>>;
    async fn get_posts(&self) -> Result<Vec<Post>>;
    async fn create_post(
        &self,
        title: &str,
        body: &str,
        create_at: &str,
        img_name: Option<&str>,
    ) -> Result<Post>;
    async fn update_post(&self, post_id: i64, title: &str, body: &str) -> Result<Post>;
    async fn delete_post(&self, post_id: i64) -> Result<()>;
}

#[async_trait]
impl PostsRepository for SqliteRepo {
    async fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, body, create_at, img_name FROM posts WHERE id = ?
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, body, create_at, img_name FROM posts ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn create_post(
        &self,
        title: &str,
        body: &str,
        create_at: &str,
        img_name: Option<&str>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, body, create_at, img_name)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, body, create_at, img_name
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(create_at)
        .bind(img_name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn update_post(&self, post_id: i64, title: &str, body: &str) -> Result<Post> {
        // create_at is immutable once the post exists.
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = ?,
                body = ?
            WHERE id = ?
            RETURNING id, title, body, create_at, img_name
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        post.ok_or(Error::NotFound)
    }

    async fn delete_post(&self, post_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(post_id, "Delete requested for missing post");
            return Err(Error::NotFound);
        }

        tracing::info!(post_id, "Post deleted");
        Ok(())
    }
}
