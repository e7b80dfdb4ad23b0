mod action;
mod engine;
mod prompt;

pub use action::{Confirm, ShowAction, UnknownKey};
pub use engine::{
    group_by_show, ShowGroups, TriageEngine, TriageError, TriageOptions, TriageOutcome,
    TriageSummary,
};
pub use prompt::{read_choice, PromptError};
