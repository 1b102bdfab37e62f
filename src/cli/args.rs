use clap::Args;
use std::path::PathBuf;

/// Options shared by both tools
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors and hide progress spinners
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (default: ~/.gleif/config.yaml)
    #[arg(long, env = "GLEIF_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GLEIF API base URL
    #[arg(long, env = "GLEIF_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "GLEIF_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print single-line JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

/// Entity search arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search string to find matching legal entities
    pub query: String,

    /// Search across all fields (name, address, metadata) instead of legal names only
    #[arg(long)]
    pub fulltext: bool,

    /// Filter results by country (2-letter ISO code, case-insensitive, e.g. GB, US, CN)
    #[arg(short, long, value_name = "CODE")]
    pub country: Option<String>,

    /// Look up ISINs for each entity (issues extra API requests)
    #[arg(long)]
    pub include_instruments: bool,

    /// Maximum number of ISIN lookup requests for the whole search
    #[arg(long, value_name = "N", requires = "include_instruments")]
    pub instrument_request_budget: Option<u32>,
}

/// Reference data arguments
#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// Type of reference data to fetch (see --list)
    #[arg(value_name = "TYPE", conflicts_with_all = ["all", "list"])]
    pub data_type: Option<String>,

    /// Fetch every reference data type
    #[arg(long, conflicts_with = "list")]
    pub all: bool,

    /// List available reference data types without contacting the API
    #[arg(long)]
    pub list: bool,
}
