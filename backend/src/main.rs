use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, Level};

use expense_tracker_backend::auth::JwtService;
use expense_tracker_backend::config::AppConfig;
use expense_tracker_backend::domain::{CategoryService, ExpenseService, UserService};
use expense_tracker_backend::rest::{api_router, AppState};
use expense_tracker_backend::storage::DbConnection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = AppConfig::from_env()?;

    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    let state = AppState {
        users: UserService::new(db.clone()),
        categories: CategoryService::new(db.clone()),
        expenses: ExpenseService::new(db),
        tokens: Arc::new(JwtService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl_hours,
        )),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api_router(state))
        .fallback_service(ServeDir::new(PathBuf::from("public")))
        .layer(cors);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
