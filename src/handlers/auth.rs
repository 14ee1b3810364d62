use std::sync::Arc;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Form, Router,
};
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

use crate::{
    errors::first_validation_message,
    middleware::{
        flash::{set_flash, take_flash},
        CurrentUser, SESSION_COOKIE,
    },
    models::users::{LoginUserDto, SignupUserDto},
    views, AppState, Error, Result,
};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const ACCOUNT_CREATED: &str = "Account created, please log in.";

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

pub fn signup_handler() -> Router {
    Router::new().route("/signup", get(signup_form).post(signup))
}

async fn login_form(
    Extension(current): Extension<CurrentUser>,
    cookies: Cookies,
) -> impl IntoResponse {
    views::login(current.user(), take_flash(&cookies).as_deref())
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    cookies: Cookies,
    Form(credentials): Form<LoginUserDto>,
) -> Result<Response> {
    if let Err(e) = credentials.validate() {
        set_flash(&cookies, &first_validation_message(&e));
        return Ok(Redirect::to("/login").into_response());
    }

    let user = match app_state
        .auth_service
        .authenticate(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => user,
        Err(Error::Unauthorized) => {
            tracing::info!(username = %credentials.username, "Login rejected");
            set_flash(&cookies, INVALID_CREDENTIALS);
            return Ok(Redirect::to("/login").into_response());
        }
        Err(e) => return Err(e),
    };

    let token = app_state.auth_service.login(&user)?;

    let cookie_duration = time::Duration::minutes(app_state.auth_service.session_minutes());
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();
    cookies.add(cookie);

    Ok(Redirect::to("/").into_response())
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Redirect::to("/login")
}

async fn signup_form(
    Extension(current): Extension<CurrentUser>,
    cookies: Cookies,
) -> impl IntoResponse {
    views::signup(current.user(), take_flash(&cookies).as_deref())
}

pub async fn signup(
    Extension(app_state): Extension<Arc<AppState>>,
    cookies: Cookies,
    Form(new_user): Form<SignupUserDto>,
) -> Result<Response> {
    if let Err(e) = new_user.validate() {
        set_flash(&cookies, &first_validation_message(&e));
        return Ok(Redirect::to("/signup").into_response());
    }

    match app_state
        .auth_service
        .signup(&new_user.username, &new_user.password)
        .await
    {
        Ok(_) => {
            set_flash(&cookies, ACCOUNT_CREATED);
            Ok(Redirect::to("/login").into_response())
        }
        Err(Error::Conflict(msg)) => {
            set_flash(&cookies, &msg);
            Ok(Redirect::to("/signup").into_response())
        }
        Err(e) => Err(e),
    }
}
