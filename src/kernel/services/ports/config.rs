use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Content server listener settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Sleep applied before dispatching each request. Some asset-loading
    /// clients race their own initialisation against the first response; 0
    /// turns the delay off.
    pub request_delay_ms: u64,
    /// Upper bound on a single asset read.
    pub read_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_delay_ms: 20,
            read_timeout_ms: 2000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Full overlay fade; each of the two phases takes half of it.
    pub fade_duration_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: 500,
            tick_interval_ms: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}
