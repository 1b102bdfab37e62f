pub mod reference;
pub mod search;

use crate::api::client::GleifClient;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::error::Result;

/// Resolve configuration (file, then environment and flags) and build the API client
pub(crate) fn load_config(common: &CommonArgs) -> Result<Config> {
    Config::load(common.config.as_deref())?
        .with_overrides(common.base_url.as_deref(), common.timeout)
}

pub(crate) fn create_client(config: &Config) -> Result<GleifClient> {
    GleifClient::new(config.client_config())
}
