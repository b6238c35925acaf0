use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Start with the sample users instead of an empty collection
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

const fn default_seed() -> bool {
    true
}

impl MockConfig {
    /// Load `.env` if present, then read the `MOCK_` prefixed variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("MOCK_").from_env()
    }
}
