use thiserror::Error;

pub type Result<T> = std::result::Result<T, RagError>;

#[derive(Debug, Error)]
pub enum RagError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Any non-2xx response from the search or completion service. Failures that never
    /// produce a response (connection refused, DNS, TLS) are [`RagError::Transport`].
    #[error("upstream error from {url}: {status} - {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    /// The request never got an HTTP response. Not retried, aborts the run like `Upstream`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON, or a field had a shape that cannot be defaulted.
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RagError {
    pub fn is_config(&self) -> bool {
        matches!(self, RagError::Config(_))
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RagError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value in {var}: {reason}")]
    InvalidFormat { var: &'static str, reason: String },
}
