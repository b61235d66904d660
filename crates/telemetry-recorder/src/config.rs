//! Logger configuration with environment overrides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use f1_telemetry::DEFAULT_UDP_PORT;

pub const ENV_BIND_ADDR: &str = "F1TEL_BIND_ADDR";
pub const ENV_UDP_PORT: &str = "F1TEL_UDP_PORT";
pub const ENV_LOG_DIR: &str = "F1TEL_LOG_DIR";

pub const DEFAULT_LOG_DIR: &str = "telemetry_logs";
pub const DEFAULT_MAX_DATAGRAM_BYTES: usize = 2048;

/// Where to listen and where to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    pub bind_addr: SocketAddr,
    pub log_dir: PathBuf,
    /// Receive buffer size. Longer datagrams are truncated by the socket.
    pub max_datagram_bytes: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_UDP_PORT),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_datagram_bytes: DEFAULT_MAX_DATAGRAM_BYTES,
        }
    }
}

impl RecorderConfig {
    /// Defaults with `F1TEL_*` overrides applied. Unparsable values are
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(addr) = lookup(ENV_BIND_ADDR).and_then(|v| v.parse::<SocketAddr>().ok()) {
            config.bind_addr = addr;
        }
        let port = lookup_u16(&lookup, ENV_UDP_PORT, config.bind_addr.port());
        config.bind_addr.set_port(port);
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }
}

fn lookup_u16<F>(lookup: &F, name: &str, fallback: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|v| v.parse::<u16>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}
