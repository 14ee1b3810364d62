use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{models::users::User, repositories::user_repo::UserRepository, Error, Result};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expiration: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Argon2id digest of `password` with a fresh random salt, in PHC string form.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// A digest that does not parse never verifies.
pub fn verify_password(digest: &str, password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        tracing::warn!("Stored password hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        jwt_expiration: i64,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration,
        }
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<User> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(Error::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        self.user_repo.create_user(username, &password_hash).await
    }

    /// Checks credentials. Unknown users and wrong passwords are indistinguishable.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(Error::Unauthorized)?;

        if !verify_password(&user.password, password) {
            return Err(Error::Unauthorized);
        }

        Ok(user)
    }

    /// Issues the session token that identifies `user` on later requests.
    pub fn login(&self, user: &User) -> Result<String> {
        tracing::info!(user_id = user.id, "User logged in");
        self.generate_token(user.id, self.jwt_expiration)
    }

    pub async fn user_loader(&self, user_id: i64) -> Result<Option<User>> {
        self.user_repo.get_user(user_id).await
    }

    /// Resolves a session token back to its user, `None` for any invalid or stale token.
    pub async fn session_user(&self, token: &str) -> Result<Option<User>> {
        let Ok(user_id) = self.decode_token(token) else {
            return Ok(None);
        };

        self.user_loader(user_id).await
    }

    pub async fn has_users(&self) -> Result<bool> {
        Ok(self.user_repo.count_users().await? > 0)
    }

    pub fn session_minutes(&self) -> i64 {
        self.jwt_expiration
    }

    fn generate_token(&self, user_id: i64, expires_in_minutes: i64) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(expires_in_minutes)).timestamp() as usize;
        let iat = now.timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| Error::InternalServerError)
    }

    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<i64> {
        let decode = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthorized)?;

        decode.claims.sub.parse().map_err(|_| Error::Unauthorized)
    }
}
