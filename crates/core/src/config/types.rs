use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream catalog endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSourceConfig {
    /// Endpoint returning the book list as JSON
    #[serde(default = "default_catalog_url")]
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CatalogSourceConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://gutendex.com/books/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("Bookshelf/{}", env!("CARGO_PKG_VERSION"))
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fetch the catalog once before accepting requests
    #[serde(default = "default_refresh_on_start")]
    pub refresh_on_start: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            refresh_on_start: default_refresh_on_start(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_refresh_on_start() -> bool {
    true
}
