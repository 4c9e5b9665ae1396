use crate::collectors::Stage;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No session token installed, log in before sending requests")]
    AuthNotReady,
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("Failed to encode the request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Cannot render {metric_id} of {object_name}: unsupported value {value}")]
    Render {
        metric_id: String,
        object_name: String,
        value: String,
    },
    #[error("{count} hosts exceed the limit of {limit} hosts per realtime request")]
    TooManyHosts { count: usize, limit: usize },
    #[error("Cannot {action} in stage {stage}")]
    Stage { stage: Stage, action: &'static str },
    #[error("Invalid endpoint URL {0}")]
    Url(String),
    #[error("Failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn request(url: &url::Url, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &url::Url, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
