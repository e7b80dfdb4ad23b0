pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod plex;
pub mod triage;
pub mod ui;

pub use config::{default_config_path, ConfigError, ConfigStore, Policy, ShowPolicies};
pub use error::{AppError, ExitCode};
pub use plex::{ApiError, EpisodeRecord, Library, MediaId, MediaServer, PlexClient, ServerConfig, WatchedSet};
pub use triage::{
    group_by_show, ShowAction, TriageEngine, TriageError, TriageOptions, TriageOutcome,
    TriageSummary,
};
