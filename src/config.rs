use std::{env, path::PathBuf};

use argon2::password_hash::rand_core::{OsRng, RngCore};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Session lifetime in minutes.
    pub jwt_maxage: i64,
    pub port: u16,
    pub upload_root: PathBuf,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub username: String,
    pub password: String,
    /// Default sender for every outgoing message.
    pub from: String,
    /// Address of the site owner, receives contact notifications.
    pub owner: String,
}

impl Config {
    pub fn init() -> Config {
        let smtp_username = env::var("SMTP_USERNAME").unwrap_or_default();
        let smtp = SmtpConfig {
            host: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: parse_var("SMTP_PORT", 465),
            tls: parse_var("SMTP_TLS", true),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| smtp_username.clone()),
            owner: env::var("SMTP_OWNER").unwrap_or_else(|_| smtp_username.clone()),
            username: smtp_username,
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, sessions will not survive a restart");
                random_secret()
            }
        };

        Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://blog.db?mode=rwc".to_string()),
            jwt_secret,
            jwt_maxage: parse_var("JWT_MAXAGE", 60),
            port: parse_var("PORT", 8080),
            upload_root: env::var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/img")),
            smtp,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, value);
            default
        }),
        Err(_) => default,
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 24];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
