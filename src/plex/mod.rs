mod client;
mod types;

pub use client::PlexClient;
pub use types::{
    ApiError, EpisodeRecord, Library, MediaId, ServerConfig, WatchedSet, DEFAULT_HOST,
    DEFAULT_PORT,
};

/// Operations the tool needs from a media server.
///
/// Every call is a single blocking request; nothing is retried.
pub trait MediaServer {
    /// All library sections, in server order
    fn list_libraries(&self) -> Result<Vec<Library>, ApiError>;

    /// Episodes with a nonzero view count in the given library
    fn list_watched(&self, library_id: &str) -> Result<WatchedSet, ApiError>;

    /// Delete one media item and its files.
    ///
    /// Returns `ApiError::DeletionForbidden` when the server has remote
    /// deletion switched off.
    fn delete_media(&self, media_id: &MediaId) -> Result<(), ApiError>;
}
