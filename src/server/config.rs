/*!
# Server Configuration

Configuration is resolved from three layers, highest priority first:

1. CLI arguments (with environment-variable fallbacks, `GRAPHWIRE_*`)
2. an optional JSON config file (`--config`)
3. built-in defaults

Only the settings the server actually consults live here: the bind address,
the port, and the idle timeout. The timeout is configurable mainly so the
timeout path stays testable without waiting out the production value.
*/

use crate::core::error::GraphwireError;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

/// The default listening port.
pub const DEFAULT_PORT: u16 = 50000;

/// How long a session waits for input before terminating.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind: IpAddr,
    /// Port the listener binds to; `0` requests an ephemeral port.
    pub port: u16,
    /// Inactivity bound on each session's reads.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Command-line arguments for graphwire-server.
#[derive(Parser, Debug, Clone)]
#[command(name = "graphwire-server")]
#[command(about = "Line-oriented TCP server exposing a shared weighted directed graph")]
#[command(version)]
pub struct CliArgs {
    /// Address to bind the listener to
    #[arg(long, env = "GRAPHWIRE_BIND")]
    pub bind: Option<IpAddr>,

    /// Port to listen on (0 requests an ephemeral port)
    #[arg(long, short = 'p', env = "GRAPHWIRE_PORT")]
    pub port: Option<u16>,

    /// Seconds of client silence before a session is terminated
    #[arg(long, env = "GRAPHWIRE_IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: Option<u64>,

    /// Optional JSON configuration file
    #[arg(long, short = 'c', env = "GRAPHWIRE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Resolves the final configuration from arguments, the optional config
    /// file, and defaults.
    pub fn resolve(&self) -> Result<ServerConfig, GraphwireError> {
        let base = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    GraphwireError::config(format!("cannot read {}: {}", path.display(), e))
                })?;
                serde_json::from_str::<ServerConfig>(&text)?
            }
            None => ServerConfig::default(),
        };
        Ok(ServerConfig {
            bind: self.bind.unwrap_or(base.bind),
            port: self.port.unwrap_or(base.port),
            idle_timeout: self
                .idle_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(base.idle_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            bind: None,
            port: None,
            idle_timeout_secs: None,
            config: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = no_args().resolve().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 50000);
        assert_eq!(config.idle_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            port: Some(0),
            idle_timeout_secs: Some(5),
            ..no_args()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.port, 0);
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.bind, ServerConfig::default().bind);
    }

    #[test]
    fn test_config_round_trips_as_json() {
        let config = ServerConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let back: ServerConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
