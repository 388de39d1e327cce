//! Server configuration from environment variables (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

/// Which record store backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::Invalid {
                key: "ROSTER_STORE",
                value: s.to_string(),
                reason: "expected postgres or memory",
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub store: StoreKind,
    /// Schema holding the entity tables. Must be a plain PostgreSQL identifier.
    pub schema: String,
    pub host: String,
    pub port: u16,
    /// Prefix for resource routes, e.g. `/api`. Empty mounts them at the root.
    pub api_prefix: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/roster".into(),
            store: StoreKind::Postgres,
            schema: "roster".into(),
            host: "0.0.0.0".into(),
            port: 3000,
            api_prefix: "/api".into(),
            max_connections: 5,
            body_limit: 64 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();
        if let Some(v) = lookup("DATABASE_URL") {
            config.database_url = v;
        }
        if let Some(v) = lookup("ROSTER_STORE") {
            config.store = v.parse()?;
        }
        if let Some(v) = lookup("ROSTER_SCHEMA") {
            if !is_identifier(&v) {
                return Err(ConfigError::Invalid {
                    key: "ROSTER_SCHEMA",
                    value: v,
                    reason: "expected a PostgreSQL identifier",
                });
            }
            config.schema = v;
        }
        if let Some(v) = lookup("HOST") {
            config.host = v;
        }
        if let Some(v) = lookup("PORT") {
            config.port = parse_number("PORT", v, "expected a port number")?;
        }
        if let Some(v) = lookup("API_PREFIX") {
            config.api_prefix = normalize_prefix(&v);
        }
        if let Some(v) = lookup("MAX_CONNECTIONS") {
            config.max_connections = parse_number("MAX_CONNECTIONS", v, "expected a positive integer")?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            config.body_limit = parse_number("BODY_LIMIT_BYTES", v, "expected a byte count")?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(key: &'static str, v: String, reason: &'static str) -> Result<T, ConfigError> {
    match v.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::Invalid { key, value: v, reason }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `api/` -> `/api`, `/` -> ``.
fn normalize_prefix(s: &str) -> String {
    let trimmed = s.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
