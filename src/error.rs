use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write config file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Dataref resolution errors.
///
/// Every variant names the dataref that failed so a single aborted
/// resolution pass can be diagnosed from the log line alone.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("failed to resolve {dataref}: {source}")]
    Request {
        dataref: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to resolve {dataref}: API returned status {status}")]
    Status { dataref: &'static str, status: u16 },

    #[error("failed to resolve {dataref}: dataref not found")]
    NotFound { dataref: &'static str },
}

impl ResolveError {
    /// The dataref whose lookup failed.
    #[must_use]
    pub fn dataref(&self) -> &'static str {
        match self {
            Self::Request { dataref, .. }
            | Self::Status { dataref, .. }
            | Self::NotFound { dataref } => dataref,
        }
    }
}

/// Bushtalk tracking API errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("authentication failed: status {status}")]
    AuthFailed { status: u16 },

    #[error("track request failed: status {status}")]
    PublishFailed { status: u16 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
