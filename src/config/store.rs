use super::types::{ConfigError, ShowPolicies, CONFIG_FILE_NAME};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The on-disk show policy record.
///
/// Loaded once at startup. Every mutation must be followed by `save()`.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    policies: ShowPolicies,
}

impl ConfigStore {
    /// Load the record at `path`, or start empty if the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let policies = match File::open(&path) {
            Ok(file) => {
                let policies = Self::read_policies(&path, file)?;
                info!(
                    "Loaded config from {:?}: {} always-delete, {} always-ignore",
                    path,
                    policies.always_delete.len(),
                    policies.always_ignore.len()
                );
                policies
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {:?}, starting with empty policy", path);
                ShowPolicies::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Ok(Self { path, policies })
    }

    fn read_policies(path: &Path, file: File) -> Result<ShowPolicies, ConfigError> {
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            } else {
                ConfigError::Malformed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })
    }

    pub fn policies(&self) -> &ShowPolicies {
        &self.policies
    }

    pub fn policies_mut(&mut self) -> &mut ShowPolicies {
        &mut self.policies
    }

    /// Write the record to disk now
    pub fn save(&self) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = File::create(&temp_path).map_err(write_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.policies)
                .map_err(|e| write_err(e.into()))?;
            writer.write_all(b"\n").map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_err)?;

        info!(
            "Saved config to {:?}: {} always-delete, {} always-ignore",
            self.path,
            self.policies.always_delete.len(),
            self.policies.always_ignore.len()
        );
        Ok(())
    }
}

/// `~/.plex-delete.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}
