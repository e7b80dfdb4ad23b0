use crate::plex::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use clap::Parser;
use std::path::PathBuf;

/// The top-level action for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ListLibraries,
    ListWatched,
    DeleteWatched,
}

#[derive(Parser, Debug)]
#[command(name = "plex-delete")]
#[command(author, version, long_about = None)]
#[command(about = "Uses HTTP API to interact with your Plex libraries")]
pub struct Args {
    /// Plex server's IP or DNS hostname
    #[arg(short, long, default_value = DEFAULT_HOST, help_heading = "Configuration")]
    pub server: String,

    /// Plex server's port number
    #[arg(short, long, default_value_t = DEFAULT_PORT, help_heading = "Configuration")]
    pub port: u16,

    /// Library to target
    #[arg(
        short = 'l',
        long,
        value_name = "LIBRARY_ID",
        default_value = "1",
        help_heading = "Configuration"
    )]
    pub target_library: String,

    /// Plex token (see: https://support.plex.tv/hc/en-us/articles/204059436)
    #[arg(
        short,
        long,
        value_name = "PLEX_TOKEN",
        env = "PLEX_TOKEN",
        hide_env_values = true,
        help_heading = "Configuration"
    )]
    pub token: String,

    /// Config file holding always-delete / always-ignore show lists
    /// [default: ~/.plex-delete.json]
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS", help_heading = "Configuration")]
    pub timeout: u64,

    /// List libraries available
    #[arg(long, help_heading = "Informational")]
    pub list_libraries: bool,

    /// List watched videos
    #[arg(long, help_heading = "Informational")]
    pub list_watched: bool,

    /// Delete watched videos
    #[arg(long, help_heading = "Modifications")]
    pub delete_watched: bool,

    /// Disregard config and do not confirm deletions
    #[arg(long, help_heading = "Modifications")]
    pub force: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The single selected mode, or `None` when zero or several were given
    pub fn mode(&self) -> Option<Mode> {
        match (self.list_libraries, self.list_watched, self.delete_watched) {
            (true, false, false) => Some(Mode::ListLibraries),
            (false, true, false) => Some(Mode::ListWatched),
            (false, false, true) => Some(Mode::DeleteWatched),
            _ => None,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            timeout_secs: self.timeout,
            ..ServerConfig::new(&self.server, self.port, &self.token)
        }
    }
}
