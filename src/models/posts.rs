use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Format of `Post::create_at`, e.g. `2024-05-01 13:37`.
pub const CREATE_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub create_at: String,
    pub img_name: Option<String>,
}

impl Post {
    /// Public URL of the attached image, if any.
    pub fn image_url(&self) -> Option<String> {
        let img_name = self.img_name.as_deref()?;
        let file_name = Path::new(img_name).file_name()?.to_str()?;
        Some(format!("/uploads/{}", urlencoding::encode(file_name)))
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct PostFormDto {
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 300, message = "Body must be between 1 and 300 characters"))]
    pub body: String,
}
