use std::sync::Arc;

use axum::{middleware, Extension, Router};
use tower_cookies::CookieManagerLayer;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        auth::{auth_handler, signup_handler},
        pages::pages_handler,
        posts::{blog_handler, posts_handler},
    },
    middleware::{load_session, require_auth, require_auth_once_users_exist},
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let protected = posts_handler().route_layer(middleware::from_fn(require_auth));
    let signup = signup_handler().route_layer(middleware::from_fn(require_auth_once_users_exist));

    // Uploaded files are nested after the session layer and skip the user lookup.
    Router::new()
        .merge(pages_handler())
        .merge(blog_handler())
        .merge(auth_handler())
        .merge(signup)
        .merge(protected)
        .layer(middleware::from_fn(load_session))
        .nest_service("/uploads", ServeDir::new(app_state.uploads.root()))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
