use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub mod posts_repo;
pub mod user_repo;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(50) NOT NULL,
    body VARCHAR(300) NOT NULL,
    create_at VARCHAR(30) NOT NULL,
    img_name VARCHAR(100)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(30) NOT NULL UNIQUE,
    password VARCHAR(300) NOT NULL
);
"#;

#[derive(Clone, Debug)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the pool and makes sure both tables exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let repo = Self::new(pool);
        repo.init_schema().await?;
        Ok(repo)
    }

    /// In-memory database on a single connection, so every query sees the same data.
    pub async fn in_memory() -> sqlx::Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    pub async fn init_schema(&self) -> sqlx::Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::debug!("Database schema ready");
        Ok(())
    }
}
