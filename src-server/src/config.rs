//! Server configuration
//!
//! Command-line flags with environment variable fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "shootboard-server", version, about = "REST persistence service for the shoot planning dashboard")]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// SQLite database file, created on first start
    #[arg(long, env = "DATABASE_PATH", default_value = "shootboard.db")]
    pub database: PathBuf,

    /// Shared password checked by /api/auth/login
    #[arg(long, env = "APP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override() {
        let config = ServerConfig::try_parse_from([
            "shootboard-server",
            "--password",
            "secret",
            "--port",
            "8080",
            "--bind",
            "127.0.0.1",
            "--database",
            "/tmp/board.db",
        ])
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database, PathBuf::from("/tmp/board.db"));
    }

    #[test]
    fn test_bad_bind_address() {
        let config = ServerConfig::try_parse_from([
            "shootboard-server",
            "--password",
            "secret",
            "--bind",
            "not an address",
        ])
        .unwrap();
        assert!(config.socket_addr().is_err());
    }
}
