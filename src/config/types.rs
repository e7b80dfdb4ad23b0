use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".plex-delete.json";

/// Persisted per-show policy.
///
/// Both sets serialize as sorted JSON arrays. Missing keys load as empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowPolicies {
    pub always_delete: BTreeSet<String>,
    pub always_ignore: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    AlwaysDelete,
    AlwaysIgnore,
}

impl ShowPolicies {
    /// Put `show` in the always-delete set, taking it out of always-ignore
    pub fn set_always_delete(&mut self, show: &str) {
        self.always_ignore.remove(show);
        self.always_delete.insert(show.to_string());
    }

    /// Put `show` in the always-ignore set, taking it out of always-delete
    pub fn set_always_ignore(&mut self, show: &str) {
        self.always_delete.remove(show);
        self.always_ignore.insert(show.to_string());
    }

    /// Stored policy for a show. Always-delete wins if a hand-edited file lists both.
    pub fn policy_for(&self, show: &str) -> Option<Policy> {
        if self.always_delete.contains(show) {
            Some(Policy::AlwaysDelete)
        } else if self.always_ignore.contains(show) {
            Some(Policy::AlwaysIgnore)
        } else {
            None
        }
    }

    /// Shows present in both sets
    pub fn overlapping(&self) -> Vec<&str> {
        self.always_delete
            .intersection(&self.always_ignore)
            .map(String::as_str)
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine home directory for the config file")]
    NoHomeDir,
}
