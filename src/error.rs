use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeServerError {
    #[error("Missing params {} make sure you pass the parameters in URL", quote_fields(.0))]
    MissingParam(Vec<&'static str>),

    #[error("GitHub token is required to fetch repository metadata")]
    Credential,

    #[error("GitHub API request failed ({}): {message}", describe_status(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("GitHub API request failed after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        source: Box<BadgeServerError>,
    },

    #[error("GitHub API timeout after {0}ms")]
    Timeout(u64),

    #[error("{0}")]
    RepositoryFetch(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BadgeServerError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        BadgeServerError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn repository_fetch(message: impl Into<String>) -> Self {
        BadgeServerError::RepositoryFetch(message.into())
    }

    /// Whether a failed attempt is worth repeating.
    ///
    /// Network failures and unreadable bodies carry no status and are retried,
    /// as are `5xx`, `408` and `429`. Any other `4xx` means the request itself
    /// is wrong (bad credential, malformed query) and repeating it is pointless.
    pub fn is_transient(&self) -> bool {
        match self {
            BadgeServerError::Transport { status: None, .. } => true,
            BadgeServerError::Transport {
                status: Some(code),
                ..
            } => *code >= 500 || *code == 408 || *code == 429,
            _ => false,
        }
    }

    /// Field names reported by a [`BadgeServerError::MissingParam`].
    pub fn missing_fields(&self) -> Option<&[&'static str]> {
        match self {
            BadgeServerError::MissingParam(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short message that is safe to hand back to an HTTP client.
    pub fn public_message(&self) -> String {
        match self {
            BadgeServerError::MissingParam(_)
            | BadgeServerError::Credential
            | BadgeServerError::RepositoryFetch(_) => self.to_string(),
            BadgeServerError::Timeout(_) => {
                "Failed to fetch repo (GitHub API timeout)".to_string()
            }
            BadgeServerError::Transport { .. }
            | BadgeServerError::GraphQl(_)
            | BadgeServerError::RetryExhausted { .. }
            | BadgeServerError::NetworkError(_)
            | BadgeServerError::JsonError(_) => {
                "Failed to fetch repo (GitHub API error)".to_string()
            }
            BadgeServerError::IoError(_) | BadgeServerError::InvalidUrl(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

fn quote_fields(fields: &[&'static str]) -> String {
    fields
        .iter()
        .map(|field| format!("\"{}\"", field))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, BadgeServerError>;
