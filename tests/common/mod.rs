#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use personal_blog::{
    config::{Config, SmtpConfig},
    create_routes,
    mail::sendmail::Notifier,
    repositories::SqliteRepo,
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "blogtestboundary";

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        true
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub notifier: Arc<RecordingNotifier>,
    pub upload_root: PathBuf,
    /// Cookies the "browser" currently holds.
    pub cookies: HashMap<String, String>,
    _upload_dir: TempDir,
}

fn test_config(upload_root: PathBuf) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-secret".to_string(),
        jwt_maxage: 60,
        port: 0,
        upload_root,
        smtp: SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 9,
            tls: false,
            username: String::new(),
            password: String::new(),
            from: "blog@example.com".to_string(),
            owner: "owner@example.com".to_string(),
        },
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let upload_root = upload_dir.path().join("img");
        let config = test_config(upload_root.clone());

        let repo = SqliteRepo::in_memory().await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let state = Arc::new(AppState::with_notifier(config, repo, notifier.clone()));

        Self {
            router: create_routes(state.clone()),
            state,
            notifier,
            upload_root,
            cookies: HashMap::new(),
            _upload_dir: upload_dir,
        }
    }

    /// Creates an account and logs the test browser in with it.
    pub async fn logged_in() -> Self {
        let mut app = Self::new().await;
        app.state.auth_service.signup("admin", "password").await.unwrap();
        let res = app.post_form("/login", "username=admin&password=password").await;
        assert_eq!(location(&res), Some("/"));
        assert!(app.cookies.contains_key("token"));
        app
    }

    fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn remember_cookies(&mut self, res: &Response) {
        for value in res.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                self.cookies.remove(name.trim());
            } else {
                self.cookies.insert(name.trim().to_string(), value.to_string());
            }
        }
    }

    pub async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> Response {
        let builder = match self.cookie_header() {
            Some(cookies) => builder.header(header::COOKIE, cookies),
            None => builder,
        };
        let res = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        self.remember_cookies(&res);
        res
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::get(uri), Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_string())).await
    }

    pub async fn post_multipart(&mut self, uri: &str, body: Vec<u8>) -> Response {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        self.send(builder, Body::from(body)).await
    }

    pub async fn get_text(&mut self, uri: &str) -> (StatusCode, String) {
        let res = self.get(uri).await;
        let status = res.status();
        (status, body_text(res).await)
    }
}

pub fn location(res: &Response) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_bytes(res: Response) -> Vec<u8> {
    axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_text(res: Response) -> String {
    String::from_utf8(body_bytes(res).await).unwrap()
}

/// Builds a multipart body with text fields and an optional `file` part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
