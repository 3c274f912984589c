//! Turns one line of terminal input into a widget action.

use wxglance_core::{Language, Theme, UnknownCode};

/// Usage hint shown when a command can't be parsed.
pub const USAGE: &str = "/lang en|ru|et   /theme light|dark   /quit   <city>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetLanguage(Language),
    SetTheme(Theme),
    /// New contents of the city field, verbatim
    SetCity(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("/{0} needs a value")]
    MissingValue(&'static str),
    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),
}

/// Parse a line. Anything that isn't a `/command` is the new city text.
pub fn parse(line: &str) -> Result<Action, CommandError> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Action::SetCity(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("lang") => {
            let code = parts.next().ok_or(CommandError::MissingValue("lang"))?;
            Ok(Action::SetLanguage(code.parse()?))
        }
        Some("theme") => {
            let code = parts.next().ok_or(CommandError::MissingValue("theme"))?;
            Ok(Action::SetTheme(code.parse()?))
        }
        Some("quit") | Some("q") => Ok(Action::Quit),
        other => Err(CommandError::UnknownCommand(
            other.unwrap_or_default().to_string(),
        )),
    }
}
