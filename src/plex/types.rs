use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Opaque media identifier as handed out by the server (`ratingKey`).
///
/// Ordered as a plain string, so "100" sorts before "99".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A watched episode as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub show: String,
    pub season: String,
    pub episode: String,
    pub viewed_at: Option<DateTime<Utc>>,
}

impl EpisodeRecord {
    pub fn new(
        show: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
    ) -> Self {
        Self {
            show: show.into(),
            season: season.into(),
            episode: episode.into(),
            viewed_at: None,
        }
    }

    /// `"Show" S1,E2`
    pub fn label(&self) -> String {
        format!("\"{}\" S{},E{}", self.show, self.season, self.episode)
    }
}

/// All watched episodes of a library, ordered by media id
pub type WatchedSet = BTreeMap<MediaId, EpisodeRecord>;

/// A library section on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub id: String,
    pub title: String,
}

/// Connection parameters for the media server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub token: String,
    pub timeout_secs: u64,
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 32400;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            token: token.into(),
            ..Default::default()
        }
    }

    /// Build a request URL for `path`, carrying the access token as a query parameter
    pub fn make_url(&self, path: &str) -> String {
        let composed = format!("http://{}:{}{}", self.host, self.port, path);
        let separator = if composed.contains('?') { '&' } else { '?' };
        format!("{}{}X-Plex-Token={}", composed, separator, self.token)
    }
}

/// Errors that can occur when talking to the media server
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server refused to delete media {0}")]
    DeletionForbidden(MediaId),

    #[error("Server returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
