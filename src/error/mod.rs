mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::plex::{ApiError, MediaId};
use crate::triage::{PromptError, TriageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media server error: {0}")]
    Api(ApiError),

    #[error("Deletion disabled on server (media {media_id})")]
    DeletionDisabled { media_id: MediaId },

    #[error("Input error: {0}")]
    Input(#[from] PromptError),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Config(_) => ExitCode::ConfigError,
            AppError::Api(_) => ExitCode::ApiError,
            AppError::DeletionDisabled { .. } => ExitCode::DeletionDisabled,
            AppError::Input(_) => ExitCode::InputError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Config(err) => match err {
                ConfigError::Malformed { path, source } => format!(
                    "The config file is not valid JSON:\n  {}\n  {}\n\n\
                     Expected an object with \"always_delete\" and \"always_ignore\" lists.\n\
                     Fix or delete the file and try again.",
                    path.display(),
                    source
                ),
                ConfigError::NoHomeDir => String::from(
                    "Could not determine the home directory.\n\n\
                     Pass --config to choose where show policies are stored.",
                ),
                other => format!("{}\n\nCheck file permissions and try again.", other),
            },

            AppError::Api(err) => {
                let hint = match err {
                    ApiError::Status { status: 401, .. } => {
                        "The server rejected the access token. Check --token."
                    }
                    ApiError::Status { status: 404, .. } => {
                        "The requested item was not found. Check --target-library \
                         (use --list-libraries to see valid ids)."
                    }
                    ApiError::NetworkError(_) | ApiError::Timeout => {
                        "Could not reach the server. Check --server and --port."
                    }
                    _ => "The server returned an unexpected response.",
                };
                format!("Media server request failed:\n  {}\n\n{}", err, hint)
            }

            AppError::DeletionDisabled { media_id } => format!(
                "DELETION ERROR: Client delete disabled on Plex server?\n\n\
                 The server refused to delete media {} (HTTP 403).\n\
                 Enable \"Allow media deletion\" in the server settings and run again.\n\
                 No further episodes were processed.",
                media_id
            ),

            AppError::Input(err) => format!(
                "{}\n\nDelete mode needs an interactive answer for every show without a stored policy.\n\
                 Use --force to delete without prompting.",
                err
            ),

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DeletionForbidden(media_id) => AppError::DeletionDisabled { media_id },
            other => AppError::Api(other),
        }
    }
}

impl From<TriageError> for AppError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::DeletionDisabled(media_id) => AppError::DeletionDisabled { media_id },
            TriageError::Api(e) => AppError::Api(e),
            TriageError::Config(e) => AppError::Config(e),
            TriageError::Prompt(e) => AppError::Input(e),
        }
    }
}
