use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tower_cookies::Cookies;

use crate::{models::users::User, AppState, Error, Result};

pub mod flash;

pub const SESSION_COOKIE: &str = "token";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

/// Whoever the session cookie belongs to, resolved once for every request.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

/// The user behind the current session, handed to protected handlers.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: User,
}

/// Resolves the session cookie of a request to its user.
pub async fn resolve_session_user(app_state: &AppState, headers: &HeaderMap) -> Result<Option<User>> {
    let cookies = CookieJar::from_headers(headers);

    let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(None);
    };

    app_state.auth_service.session_user(&token).await
}

/// Loads the session user, if any, into the request as a [`CurrentUser`].
pub async fn load_session(mut req: Request, next: Next) -> Result<Response> {
    let app_state = req
        .extensions()
        .get::<Arc<AppState>>()
        .cloned()
        .ok_or(Error::InternalServerError)?;

    let user = resolve_session_user(&app_state, req.headers()).await?;
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Gate for protected routes: without a session user the request is sent to `/login`.
pub async fn require_auth(cookies: Cookies, mut req: Request, next: Next) -> Result<Response> {
    let session_user = req
        .extensions()
        .get::<CurrentUser>()
        .and_then(|current| current.user().cloned());

    match session_user {
        Some(user) => {
            req.extensions_mut().insert(SessionUser { user });
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Anonymous request to protected route");
            flash::set_flash(&cookies, LOGIN_REQUIRED);
            Ok(Redirect::to("/login").into_response())
        }
    }
}

/// Like [`require_auth`], but lets everyone through while no account exists yet.
pub async fn require_auth_once_users_exist(
    cookies: Cookies,
    req: Request,
    next: Next,
) -> Result<Response> {
    let app_state = req
        .extensions()
        .get::<Arc<AppState>>()
        .cloned()
        .ok_or(Error::InternalServerError)?;

    if !app_state.auth_service.has_users().await? {
        tracing::info!("No accounts yet, signup is open");
        return Ok(next.run(req).await);
    }

    require_auth(cookies, req, next).await
}
