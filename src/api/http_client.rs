use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::{GleifError, Result};

/// Build the HTTP client used for every GLEIF request of one invocation
pub fn create_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent(user_agent)
        // One request at a time; a single idle connection is enough
        .pool_max_idle_per_host(1)
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()
        .map_err(|e| GleifError::Config(format!("Failed to create HTTP client: {}", e)))
}
