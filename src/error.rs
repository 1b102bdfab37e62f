use thiserror::Error;

/// Maximum number of characters of an error response body kept for diagnosis
pub const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum GleifError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Request to {resource} (page {page}) failed: {source}")]
    Transport {
        resource: String,
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error ({status}) from {resource} (page {page}): {body}")]
    Api {
        resource: String,
        page: u32,
        status: u16,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error(
        "Failed to fetch {failed} after fetching [{}]: {source}",
        describe_completed(.completed)
    )]
    PartialFetch {
        failed: String,
        completed: Vec<(String, usize)>,
        #[source]
        source: Box<GleifError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GleifError {
    /// Create an API error, truncating the response body
    pub fn api(resource: impl Into<String>, page: u32, status: u16, body: &str) -> Self {
        Self::Api {
            resource: resource.into(),
            page,
            status,
            body: truncate_body(body, ERROR_BODY_LIMIT),
        }
    }

    /// Create a malformed-response error tied to one page of a resource
    pub fn malformed(resource: &str, page: u32, reason: impl std::fmt::Display) -> Self {
        Self::MalformedResponse(format!("{} (page {}): {}", resource, page, reason))
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidArgument(_) => Some(
                "Run with --help to see the accepted arguments.".to_string(),
            ),
            Self::Transport { source, .. } if source.is_timeout() => Some(
                "The GLEIF API did not answer in time. Raise --timeout or try again later."
                    .to_string(),
            ),
            Self::Transport { .. } => {
                Some("Check your internet connection and try again.".to_string())
            }
            Self::Api { status: 429, .. } => Some(
                "The GLEIF API allows 60 requests per minute. Please wait a moment.".to_string(),
            ),
            Self::Api { status, .. } if *status >= 500 => {
                Some("The GLEIF API reported a server error. Try again later.".to_string())
            }
            Self::MalformedResponse(_) => Some(
                "The API answered, but not in the expected format. Check --base-url.".to_string(),
            ),
            Self::PartialFetch { source, .. } => source.hint(),
            Self::Config(_) => Some(
                "Check the YAML file given with --config (default: ~/.gleif/config.yaml)."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Process exit code for the error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

fn describe_completed(completed: &[(String, usize)]) -> String {
    completed
        .iter()
        .map(|(kind, count)| format!("{} ({} items)", kind, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keep at most `limit` characters of a response body, on a single line
pub fn truncate_body(body: &str, limit: usize) -> String {
    let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if body.chars().count() > limit {
        format!("{}...", body.chars().take(limit).collect::<String>())
    } else {
        body
    }
}

pub type Result<T> = std::result::Result<T, GleifError>;
