use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequestParts, Multipart, Path},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Form, Router,
};
use tower_cookies::Cookies;
use validator::Validate;

use crate::{
    errors::first_validation_message,
    middleware::{
        flash::{set_flash, take_flash},
        CurrentUser, SessionUser,
    },
    models::posts::PostFormDto,
    views, AppState, Error, Result,
};

pub fn blog_handler() -> Router {
    Router::new().route("/blog", get(get_posts))
}

/// Routes that only make sense behind the login gate.
pub fn posts_handler() -> Router {
    Router::new()
        .route(
            "/create",
            get(create_form)
                .post(create_post)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/{id}/update", get(update_form).post(update_post))
        .route("/{id}/delete", get(delete_post))
}

/// Post id from the path. Anything that is not an integer names no post.
pub struct PostId(pub i64);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(post_id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Unparsable post id");
                Error::NotFound
            })?;

        Ok(Self(post_id))
    }
}

async fn get_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok(views::blog(&posts, current.user()))
}

async fn create_form(
    Extension(session): Extension<SessionUser>,
    cookies: Cookies,
) -> impl IntoResponse {
    views::create(&session.user, take_flash(&cookies).as_deref())
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut new_post = PostFormDto::default();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => new_post.title = field.text().await?,
            "body" => new_post.body = field.text().await?,
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                upload = Some((filename, field.bytes().await?));
            }
            _ => {}
        }
    }

    if let Err(e) = new_post.validate() {
        set_flash(&cookies, &first_validation_message(&e));
        return Ok(Redirect::to("/create").into_response());
    }

    let post = app_state
        .posts_service
        .publish(
            &app_state.uploads,
            &new_post.title,
            &new_post.body,
            upload
                .as_ref()
                .map(|(filename, bytes)| (filename.as_str(), bytes.as_ref())),
        )
        .await?;

    tracing::info!(post_id = post.id, user_id = session.user.id, "Post published");
    Ok(Redirect::to("/blog").into_response())
}

async fn update_form(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    cookies: Cookies,
    PostId(post_id): PostId,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(post_id).await?;
    Ok(views::update(&post, &session.user, take_flash(&cookies).as_deref()))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    cookies: Cookies,
    PostId(post_id): PostId,
    Form(update_post): Form<PostFormDto>,
) -> Result<Response> {
    if let Err(e) = update_post.validate() {
        set_flash(&cookies, &first_validation_message(&e));
        return Ok(Redirect::to(&format!("/{post_id}/update")).into_response());
    }

    app_state
        .posts_service
        .update_post(post_id, &update_post.title, &update_post.body)
        .await?;

    tracing::info!(post_id, user_id = session.user.id, "Post updated");
    Ok(Redirect::to("/blog").into_response())
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    PostId(post_id): PostId,
) -> Result<impl IntoResponse> {
    app_state.posts_service.delete_post(post_id).await?;

    tracing::info!(post_id, user_id = session.user.id, "Post removed");
    Ok(Redirect::to("/blog"))
}
