use std::collections::BTreeMap;
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ConfigStore, Policy};
use crate::plex::{ApiError, EpisodeRecord, MediaId, MediaServer, WatchedSet};
use crate::ui::Ui;

use super::action::{Confirm, ShowAction};
use super::prompt::{read_choice, PromptError};

/// Watched episodes partitioned by show, shows and episodes both in ascending order
pub type ShowGroups = BTreeMap<String, Vec<(MediaId, EpisodeRecord)>>;

/// Errors that stop a triage run
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Server refused to delete media {0}: remote deletion is disabled")]
    DeletionDisabled(MediaId),

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl From<ApiError> for TriageError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DeletionForbidden(id) => TriageError::DeletionDisabled(id),
            other => TriageError::Api(other),
        }
    }
}

/// Options for a triage run
#[derive(Debug, Clone, Default)]
pub struct TriageOptions {
    /// Delete everything, ignoring stored policy and never prompting
    pub force: bool,
}

/// Counters for a triage run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageSummary {
    pub shows_processed: usize,
    pub shows_skipped: usize,
    pub episodes_deleted: usize,
    pub episodes_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// Every show was handled
    Completed(TriageSummary),
    /// The operator quit before the last show
    Quit(TriageSummary),
}

impl TriageOutcome {
    pub fn summary(&self) -> &TriageSummary {
        match self {
            TriageOutcome::Completed(summary) | TriageOutcome::Quit(summary) => summary,
        }
    }
}

/// Partition a watched set by show name
pub fn group_by_show(watched: WatchedSet) -> ShowGroups {
    let mut shows = ShowGroups::new();
    for (id, episode) in watched {
        shows
            .entry(episode.show.clone())
            .or_default()
            .push((id, episode));
    }
    shows
}

/// Decides and carries out one action per show.
///
/// Policy changes are written through `store` before any deletion that
/// follows from them.
pub struct TriageEngine<'a, S: MediaServer + ?Sized, R: BufRead> {
    server: &'a S,
    store: &'a mut ConfigStore,
    input: R,
    ui: Ui,
    options: TriageOptions,
}

impl<'a, S: MediaServer + ?Sized, R: BufRead> TriageEngine<'a, S, R> {
    pub fn new(
        server: &'a S,
        store: &'a mut ConfigStore,
        input: R,
        ui: Ui,
        options: TriageOptions,
    ) -> Self {
        Self {
            server,
            store,
            input,
            ui,
            options,
        }
    }

    /// Triage every show in `watched`, in show-name order
    pub fn run(&mut self, watched: WatchedSet) -> Result<TriageOutcome, TriageError> {
        let shows = group_by_show(watched);
        let mut summary = TriageSummary::default();

        info!(
            "Triaging {} shows (force: {})",
            shows.len(),
            self.options.force
        );

        if shows.is_empty() {
            self.ui.dim("No watched episodes found.");
        }

        for (show, episodes) in &shows {
            summary.shows_processed += 1;
            self.ui.show_header(show);

            if self.options.force {
                self.ui.notice("Forced mode, removing episodes");
                self.delete_all(episodes, &mut summary)?;
                continue;
            }

            match self.store.policies().policy_for(show) {
                Some(Policy::AlwaysDelete) => {
                    self.ui.notice("In always delete list, removing episodes");
                    self.delete_all(episodes, &mut summary)?;
                    continue;
                }
                Some(Policy::AlwaysIgnore) => {
                    self.ui.notice("In always ignore list, skipping");
                    summary.shows_skipped += 1;
                    continue;
                }
                None => {}
            }

            let action = self.ask_action(show, episodes)?;
            debug!(show = show.as_str(), ?action, "Operator chose action");

            match action {
                ShowAction::AlwaysDelete => {
                    self.store.policies_mut().set_always_delete(show);
                    self.store.save()?;
                    self.delete_all(episodes, &mut summary)?;
                }
                ShowAction::AlwaysIgnore => {
                    self.store.policies_mut().set_always_ignore(show);
                    self.store.save()?;
                    self.ui.notice(&format!("Added {} to always ignore list", show));
                    summary.shows_skipped += 1;
                }
                ShowAction::RemoveAll => {
                    self.delete_all(episodes, &mut summary)?;
                }
                ShowAction::Interactive => {
                    self.delete_interactively(episodes, &mut summary)?;
                }
                ShowAction::Skip => {
                    self.ui.notice(&format!("Skipping {} this time", show));
                    summary.shows_skipped += 1;
                }
                ShowAction::Quit => {
                    info!("Quit requested at show {:?}", show);
                    self.ui.dim("Quitting.");
                    return Ok(TriageOutcome::Quit(summary));
                }
            }
        }

        self.ui.blank();
        self.ui.success(&format!(
            "Deleted {} episodes, skipped {} episodes across {} shows",
            summary.episodes_deleted, summary.episodes_skipped, summary.shows_processed
        ));

        Ok(TriageOutcome::Completed(summary))
    }

    fn ask_action(
        &mut self,
        show: &str,
        episodes: &[(MediaId, EpisodeRecord)],
    ) -> Result<ShowAction, TriageError> {
        for (_, episode) in episodes {
            self.ui.episode(episode);
        }
        self.ui.menu(show, episodes.len());

        let ui = &mut self.ui;
        let action = read_choice(&mut self.input, |line| {
            ui.unrecognized(line, "a, n, r, i, s, q")
        })?;
        Ok(action)
    }

    fn delete_all(
        &mut self,
        episodes: &[(MediaId, EpisodeRecord)],
        summary: &mut TriageSummary,
    ) -> Result<(), TriageError> {
        for (id, episode) in episodes {
            self.delete_episode(id, episode)?;
            summary.episodes_deleted += 1;
        }
        Ok(())
    }

    fn delete_interactively(
        &mut self,
        episodes: &[(MediaId, EpisodeRecord)],
        summary: &mut TriageSummary,
    ) -> Result<(), TriageError> {
        for (id, episode) in episodes {
            self.ui.confirm_prompt(episode);

            let ui = &mut self.ui;
            let answer = read_choice(&mut self.input, |line| {
                ui.unrecognized(line, "y, n");
                ui.confirm_prompt(episode);
            })?;

            match answer {
                Confirm::Yes => {
                    self.delete_episode(id, episode)?;
                    summary.episodes_deleted += 1;
                }
                Confirm::No => {
                    self.ui.skipping(episode);
                    summary.episodes_skipped += 1;
                }
            }
        }
        Ok(())
    }

    fn delete_episode(&mut self, id: &MediaId, episode: &EpisodeRecord) -> Result<(), TriageError> {
        self.ui.removing(episode);

        match self.server.delete_media(id) {
            Ok(()) => {
                info!("Deleted media {} ({})", id, episode.label());
                Ok(())
            }
            Err(e) => {
                warn!("Delete of media {} failed: {}", id, e);
                Err(e.into())
            }
        }
    }
}
