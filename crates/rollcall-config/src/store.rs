use std::env;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl StoreConfig {
    /// `STORE_BACKEND` wins; otherwise Postgres when `DATABASE_URL` is set.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let backend = env::var("STORE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(if database_url.is_some() {
                StoreBackend::Postgres
            } else {
                StoreBackend::Memory
            });

        Self {
            backend,
            database_url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}
