//! Environment-driven service configuration.
//!
//! All knobs come from the environment with working local-dev defaults,
//! read once at startup.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the storefront server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Base URL of the payment gateway API (`GATEWAY_URL`).
    pub gateway_url: String,

    /// Public origin of this storefront, used to build the redirect URLs
    /// handed to the gateway (`PUBLIC_URL`).
    pub public_url: String,

    /// Directory holding the durable session storage (`DATA_DIR`).
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment, falling back to local-dev
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let gateway_url = env::var("GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());

        let public_url = env::var("PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Self {
            bind_addr,
            gateway_url,
            // Trailing slashes would produce double slashes in redirect URLs.
            public_url: public_url.trim_end_matches('/').to_string(),
            data_dir,
        }
    }

    /// Where the gateway sends the customer after a completed payment.
    pub fn success_url(&self) -> String {
        format!("{}/checkout/success", self.public_url)
    }

    /// Where the gateway sends the customer after backing out.
    pub fn cancel_url(&self) -> String {
        format!("{}/checkout/cancel", self.public_url)
    }
}
