use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/ripple.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlAction {
    Check,
    Uncheck,
    Toggle,
}

/// One line of the control protocol: `<action> <card>`, card index zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCommand {
    pub action: ControlAction,
    pub card: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("missing card index")]
    MissingCard,
    #[error("invalid card index {0:?}")]
    InvalidCard(String),
    #[error("unexpected trailing input {0:?}")]
    Trailing(String),
}

impl FromStr for ControlCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let action = words.next().ok_or(CommandError::Empty)?;
        let action = ControlAction::from_str(action)
            .map_err(|_| CommandError::UnknownAction(action.to_string()))?;
        let card = words.next().ok_or(CommandError::MissingCard)?;
        let card = card
            .parse()
            .map_err(|_| CommandError::InvalidCard(card.to_string()))?;
        if let Some(extra) = words.next() {
            return Err(CommandError::Trailing(extra.to_string()));
        }
        Ok(Self { action, card })
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.card)
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Control(ControlCommand),
    ConfigReload,
}
