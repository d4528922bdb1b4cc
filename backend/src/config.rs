use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::warn;

const DEFAULT_DATABASE_URL: &str = "sqlite:expenses.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to
    /// development defaults
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .context("TOKEN_TTL_HOURS is not a valid number of hours")?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            token_ttl_hours,
        })
    }
}
