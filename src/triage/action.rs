use std::str::FromStr;
use thiserror::Error;

/// What to do with one show's watched episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowAction {
    AlwaysDelete,
    AlwaysIgnore,
    RemoveAll,
    Interactive,
    Skip,
    Quit,
}

/// Answer to a per-episode "remove this?" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized key: {0:?}")]
pub struct UnknownKey(pub String);

impl ShowAction {
    pub const ALL: [ShowAction; 6] = [
        ShowAction::AlwaysDelete,
        ShowAction::AlwaysIgnore,
        ShowAction::RemoveAll,
        ShowAction::Interactive,
        ShowAction::Skip,
        ShowAction::Quit,
    ];

    pub fn key(self) -> char {
        match self {
            ShowAction::AlwaysDelete => 'a',
            ShowAction::AlwaysIgnore => 'n',
            ShowAction::RemoveAll => 'r',
            ShowAction::Interactive => 'i',
            ShowAction::Skip => 's',
            ShowAction::Quit => 'q',
        }
    }

    /// Menu line for this action, e.g. `(r)emove all 3 watched files from Foo`
    pub fn describe(self, show: &str, count: usize) -> String {
        match self {
            ShowAction::AlwaysDelete => format!("(a)lways delete watched files from series {}", show),
            ShowAction::AlwaysIgnore => format!("(n)ever delete watched files from series {}", show),
            ShowAction::RemoveAll => format!("(r)emove all {} watched files from {}", count, show),
            ShowAction::Interactive => format!("(i)nteractively delete watched files from {}", show),
            ShowAction::Skip => format!("(s)kip {} this time", show),
            ShowAction::Quit => "(q)uit the program".to_string(),
        }
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl FromStr for ShowAction {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        ShowAction::ALL
            .into_iter()
            .find(|action| {
                let mut chars = key.chars();
                chars.next() == Some(action.key()) && chars.next().is_none()
            })
            .ok_or(UnknownKey(key))
    }
}

impl FromStr for Confirm {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "y" => Ok(Confirm::Yes),
            "n" => Ok(Confirm::No),
            other => Err(UnknownKey(other.to_string())),
        }
    }
}
