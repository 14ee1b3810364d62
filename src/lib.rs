use std::sync::Arc;

use config::Config;
use mail::sendmail::{Notifier, SmtpNotifier};
use repositories::SqliteRepo;
use services::{auth::AuthService, posts::PostsService, uploads::UploadService};

pub use self::errors::{Error, Result};
pub use self::routes::create_routes;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod views;

/// Everything a request handler may touch, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub posts_service: PostsService,
    pub uploads: UploadService,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Wires the services over `repo`, mailing through the configured SMTP relay.
    pub fn new(config: Config, repo: SqliteRepo) -> Self {
        let notifier = Arc::new(SmtpNotifier::new(config.smtp.clone()));
        Self::with_notifier(config, repo, notifier)
    }

    pub fn with_notifier(config: Config, repo: SqliteRepo, notifier: Arc<dyn Notifier>) -> Self {
        let repo = Arc::new(repo);

        Self {
            auth_service: AuthService::new(
                repo.clone(),
                config.jwt_secret.clone(),
                config.jwt_maxage,
            ),
            posts_service: PostsService::new(repo),
            uploads: UploadService::new(config.upload_root.clone()),
            notifier,
            config,
        }
    }
}
