//! Configuration for the gateway server.
//!
//! Layered, later layers win:
//!
//! 1. built-in defaults
//! 2. optional TOML file (`--config <path>`)
//! 3. `GATEWAY_*` environment variables
//! 4. command-line flags (applied by `main` via [`Config::apply_overrides`])
//!
//! ```toml
//! log_level = "debug"
//!
//! [transport]
//! port = 9999
//! reply_to = "127.0.0.1:10000"
//!
//! [gateway]
//! sender_comp_id = "EXCHANGE"
//!
//! [gateway.quote]
//! spread_threshold = "0.05"
//! ```

use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use gateway_core::GatewayConfig;
use gateway_protocol::parser::DEFAULT_MAX_PENDING;
use serde::Deserialize;

/// Socket-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Interface to bind (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// UDP port to listen on.
    pub port: u16,

    /// Fixed destination for replies. When unset, replies go back to the
    /// sender of the datagram.
    pub reply_to: Option<String>,

    /// Size of the receive buffer; longer datagrams are truncated by the OS.
    pub recv_buffer_size: usize,

    /// Upper bound on bytes held for an unfinished message.
    pub max_pending_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 9999,
            reply_to: None,
            recv_buffer_size: 65_536,
            max_pending_bytes: DEFAULT_MAX_PENDING,
        }
    }
}

impl TransportConfig {
    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Everything the server binary needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transport: TransportConfig,
    pub gateway: GatewayConfig,

    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            transport: TransportConfig::default(),
            gateway: GatewayConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML config")
    }

    /// Overlay `GATEWAY_*` variables. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GATEWAY_BIND_ADDR") {
            self.transport.bind_addr = v;
        }
        if let Some(v) = parse_env(&lookup, "GATEWAY_PORT")? {
            self.transport.port = v;
        }
        if let Some(v) = lookup("GATEWAY_REPLY_TO") {
            self.transport.reply_to = Some(v);
        }
        if let Some(v) = lookup("GATEWAY_SENDER_COMP_ID") {
            self.gateway.sender_comp_id = v;
        }
        if let Some(v) = lookup("GATEWAY_TARGET_COMP_ID") {
            self.gateway.target_comp_id = v;
        }
        if let Some(v) = parse_env(&lookup, "GATEWAY_HEARTBEAT_INTERVAL")? {
            self.gateway.heartbeat_interval = v;
        }
        if let Some(v) = parse_env(&lookup, "GATEWAY_SPREAD_THRESHOLD")? {
            self.gateway.quote.spread_threshold = v;
        }
        if let Some(v) = parse_env(&lookup, "GATEWAY_QUOTE_QUANTITY")? {
            self.gateway.quote.quote_quantity = v;
        }
        if let Some(v) = lookup("GATEWAY_QUOTE_SYMBOL") {
            self.gateway.quote.quote_symbol = v;
        }
        if let Some(v) = lookup("GATEWAY_LOG") {
            self.log_level = v;
        }
        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    pub fn apply_overrides(
        &mut self,
        bind_addr: Option<String>,
        port: Option<u16>,
        reply_to: Option<String>,
        log_level: Option<String>,
    ) {
        if let Some(bind_addr) = bind_addr {
            self.transport.bind_addr = bind_addr;
        }
        if let Some(port) = port {
            self.transport.port = port;
        }
        if reply_to.is_some() {
            self.transport.reply_to = reply_to;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
    }
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("invalid {}={:?}: {}", key, raw, e)),
        None => Ok(None),
    }
}
