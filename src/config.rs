//! Runtime settings from the environment. A `.env` file is honored when present.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Invalid("DATABASE_URL is not set".into()))?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|_| AppError::Invalid("BIND_ADDR is not a valid socket address".into()))?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Invalid("DATABASE_MAX_CONNECTIONS is not a number".into()))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
