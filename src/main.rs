use std::sync::Arc;

use personal_blog::{config::Config, create_routes, repositories::SqliteRepo, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,personal_blog=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::init();

    let repo = match SqliteRepo::connect(&config.database_url, 5).await {
        Ok(repo) => {
            tracing::info!("✅ Connection to the database is successful!");
            repo
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.clone(), repo);

    if let Err(err) = app_state.uploads.ensure_root().await {
        tracing::error!("🔥 Cannot create upload directory {:?}: {}", config.upload_root, err);
        std::process::exit(1);
    }

    let app = create_routes(Arc::new(app_state));

    let addr = format!("[::]:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Blog listening on http://{}", addr);
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server stopped: {}", err);
    }
}
