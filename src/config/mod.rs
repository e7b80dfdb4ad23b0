mod store;
mod types;

pub use store::{default_config_path, ConfigStore};
pub use types::{ConfigError, Policy, ShowPolicies, CONFIG_FILE_NAME};
