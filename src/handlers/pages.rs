use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Form, Router,
};

use crate::{
    mail::mails::send_contact_emails, middleware::CurrentUser, models::contact::ContactDto,
    views, AppState,
};

pub fn pages_handler() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/contact", get(contact_form).post(contact))
        .route("/go", post(go))
}

async fn index(Extension(current): Extension<CurrentUser>) -> impl IntoResponse {
    views::index(current.user())
}

async fn contact_form(Extension(current): Extension<CurrentUser>) -> impl IntoResponse {
    views::contact(current.user())
}

async fn contact(
    Extension(current): Extension<CurrentUser>,
    Form(contact): Form<ContactDto>,
) -> impl IntoResponse {
    views::contact_confirm(&contact, current.user())
}

/// Mails the submitter and the site owner. Delivery problems only show up in the logs.
async fn go(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Form(contact): Form<ContactDto>,
) -> impl IntoResponse {
    let delivery = send_contact_emails(
        app_state.notifier.as_ref(),
        &app_state.config.smtp.owner,
        &contact,
    )
    .await;

    tracing::debug!(?delivery, "Contact form processed");
    views::sent(&contact, current.user())
}
