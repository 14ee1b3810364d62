use std::sync::Arc;

use chrono::Local;

use crate::{
    models::posts::{Post, CREATE_AT_FORMAT},
    repositories::posts_repo::PostsRepository,
    services::uploads::UploadService,
    Error, Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.get_posts().await
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        self.repo.get_post(post_id).await?.ok_or(Error::NotFound)
    }

    /// Inserts a post stamped with the current local time.
    pub async fn create_post(&self, title: &str, body: &str, img_name: Option<&str>) -> Result<Post> {
        let create_at = Local::now().format(CREATE_AT_FORMAT).to_string();
        self.repo.create_post(title, body, &create_at, img_name).await
    }

    /// Stores the optional image, then inserts the post pointing at it.
    ///
    /// The image is removed again when the insert fails, so no file is left
    /// behind without a post.
    pub async fn publish(
        &self,
        uploads: &UploadService,
        title: &str,
        body: &str,
        image: Option<(&str, &[u8])>,
    ) -> Result<Post> {
        let img_name = match image {
            Some((filename, bytes)) => uploads.save(bytes, filename).await?,
            None => None,
        };

        match self.create_post(title, body, img_name.as_deref()).await {
            Ok(post) => Ok(post),
            Err(err) => {
                if let Some(path) = img_name.as_deref() {
                    uploads.discard(path).await;
                }
                Err(err)
            }
        }
    }

    pub async fn update_post(&self, post_id: i64, title: &str, body: &str) -> Result<Post> {
        self.repo.update_post(post_id, title, body).await
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        self.repo.delete_post(post_id).await
    }
}
