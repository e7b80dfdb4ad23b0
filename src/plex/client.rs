use super::types::{ApiError, EpisodeRecord, Library, MediaId, ServerConfig, WatchedSet};
use super::MediaServer;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Plex Media Server HTTP API client
pub struct PlexClient {
    client: Client,
    config: ServerConfig,
}

impl PlexClient {
    /// Create a new client for the given server
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(concat!("plex-delete/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn get_xml(&self, path: &str) -> Result<String, ApiError> {
        debug!("GET {}", path);

        let response = self
            .client
            .get(self.config.make_url(path))
            .header(ACCEPT, "application/xml")
            .send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.text()?)
    }
}

impl MediaServer for PlexClient {
    fn list_libraries(&self) -> Result<Vec<Library>, ApiError> {
        let body = self.get_xml("/library/sections")?;
        let libraries = parse_libraries(&body)?;
        info!("Found {} libraries", libraries.len());
        Ok(libraries)
    }

    fn list_watched(&self, library_id: &str) -> Result<WatchedSet, ApiError> {
        let body = self.get_xml(&format!("/library/sections/{}/all?type=4", library_id))?;
        let watched = parse_watched(&body)?;
        info!(
            "Found {} watched episodes in library {}",
            watched.len(),
            library_id
        );
        Ok(watched)
    }

    fn delete_media(&self, media_id: &MediaId) -> Result<(), ApiError> {
        let path = format!("/library/metadata/{}", media_id);
        debug!("DELETE {}", path);

        let response = self.client.delete(self.config.make_url(&path)).send()?;
        check_delete_status(response.status(), media_id, &path)
    }
}

fn check_delete_status(status: StatusCode, media_id: &MediaId, path: &str) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::FORBIDDEN {
        return Err(ApiError::DeletionForbidden(media_id.clone()));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        path: path.to_string(),
    })
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Visit every element named `tag`, whether self-closing or not
fn for_each_element<F>(xml: &str, tag: &[u8], mut visit: F) -> Result<(), ApiError>
where
    F: FnMut(&BytesStart<'_>),
{
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if e.name().as_ref() == tag => {
                visit(e);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ApiError::ParseError(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

pub(crate) fn parse_libraries(xml: &str) -> Result<Vec<Library>, ApiError> {
    let mut libraries = Vec::new();

    for_each_element(xml, b"Directory", |e| {
        match (attribute(e, b"key"), attribute(e, b"title")) {
            (Some(id), Some(title)) => libraries.push(Library { id, title }),
            _ => warn!("Skipping library entry without key or title"),
        }
    })?;

    Ok(libraries)
}

pub(crate) fn parse_watched(xml: &str) -> Result<WatchedSet, ApiError> {
    let mut watched = WatchedSet::new();

    for_each_element(xml, b"Video", |e| {
        let view_count = attribute(e, b"viewCount")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        if view_count == 0 {
            return;
        }

        let Some(rating_key) = attribute(e, b"ratingKey") else {
            warn!("Skipping watched video without ratingKey");
            return;
        };

        let viewed_at = attribute(e, b"lastViewedAt")
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        watched.insert(
            MediaId::new(rating_key),
            EpisodeRecord {
                show: attribute(e, b"grandparentTitle").unwrap_or_default(),
                season: attribute(e, b"parentIndex").unwrap_or_default(),
                episode: attribute(e, b"index").unwrap_or_default(),
                viewed_at,
            },
        );
    })?;

    Ok(watched)
}
