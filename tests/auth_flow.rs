mod common;

use axum::http::StatusCode;
use common::{location, TestApp};
use personal_blog::{
    handlers::auth::{ACCOUNT_CREATED, INVALID_CREDENTIALS},
    middleware::LOGIN_REQUIRED,
    services::auth::verify_password,
};

#[tokio::test]
async fn landing_page_is_public() {
    let mut app = TestApp::new().await;
    let (status, html) = app.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Welcome"));
}

#[tokio::test]
async fn protected_route_redirects_anonymous_users_to_login() {
    let mut app = TestApp::new().await;

    let res = app.get("/create").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));

    let (_, html) = app.get_text("/login").await;
    assert!(html.contains(LOGIN_REQUIRED));

    // The flash is one-shot.
    let (_, html) = app.get_text("/login").await;
    assert!(!html.contains(LOGIN_REQUIRED));
}

#[tokio::test]
async fn login_then_logout_toggles_access() {
    let mut app = TestApp::logged_in().await;

    let res = app.get("/create").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/logout").await;
    assert_eq!(location(&res), Some("/login"));
    assert!(!app.cookies.contains_key("token"));

    let res = app.get("/create").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[tokio::test]
async fn unknown_user_gets_invalid_credentials_message() {
    let mut app = TestApp::new().await;

    let res = app.post_form("/login", "username=ghost&password=boo").await;
    assert_eq!(location(&res), Some("/login"));
    assert!(!app.cookies.contains_key("token"));

    let (_, html) = app.get_text("/login").await;
    assert!(html.contains(INVALID_CREDENTIALS));
}

#[tokio::test]
async fn wrong_password_gets_invalid_credentials_message() {
    let mut app = TestApp::new().await;
    app.state.auth_service.signup("alice", "right").await.unwrap();

    let res = app.post_form("/login", "username=alice&password=wrong").await;
    assert_eq!(location(&res), Some("/login"));

    let (_, html) = app.get_text("/login").await;
    assert!(html.contains(INVALID_CREDENTIALS));
}

#[tokio::test]
async fn first_account_can_sign_up_without_a_session() {
    let mut app = TestApp::new().await;

    let res = app.post_form("/signup", "username=first&password=pw").await;
    assert_eq!(location(&res), Some("/login"));

    let (_, html) = app.get_text("/login").await;
    assert!(html.contains(ACCOUNT_CREATED));

    let user = app
        .state
        .auth_service
        .authenticate("first", "pw")
        .await
        .unwrap();
    assert_ne!(user.password, "pw");
    assert!(verify_password(&user.password, "pw"));
}

#[tokio::test]
async fn signup_requires_a_session_once_an_account_exists() {
    let mut app = TestApp::new().await;
    app.state.auth_service.signup("owner", "pw").await.unwrap();

    let res = app.post_form("/signup", "username=intruder&password=pw").await;
    assert_eq!(location(&res), Some("/login"));
    assert!(app
        .state
        .auth_service
        .authenticate("intruder", "pw")
        .await
        .is_err());
}

#[tokio::test]
async fn duplicate_signup_reports_conflict() {
    let mut app = TestApp::logged_in().await;

    let res = app.post_form("/signup", "username=admin&password=other").await;
    assert_eq!(location(&res), Some("/signup"));

    let (status, html) = app.get_text("/signup").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Username already exists"));
}

#[tokio::test]
async fn tampered_session_cookie_is_rejected() {
    let mut app = TestApp::new().await;
    app.cookies
        .insert("token".to_string(), "not.a.jwt".to_string());

    let res = app.get("/create").await;
    assert_eq!(location(&res), Some("/login"));
}

#[tokio::test]
async fn navigation_follows_the_session() {
    let mut app = TestApp::new().await;
    let (_, html) = app.get_text("/").await;
    assert!(html.contains(r#"href="/login""#));
    assert!(!html.contains("Logout"));

    app.state.auth_service.signup("admin", "password").await.unwrap();
    app.post_form("/login", "username=admin&password=password").await;

    let (_, html) = app.get_text("/").await;
    assert!(html.contains("Logout"));
    assert!(html.contains("admin"));
    assert!(!html.contains(r#"href="/login""#));

    app.get("/logout").await;
    let (_, html) = app.get_text("/contact").await;
    assert!(!html.contains("Logout"));
}
