use std::fmt::{self, Display};

/// Errors produced by model parsers and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyCommand,
    UnknownCommand(String),
    UnknownPanel(String),
    InvalidValue(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyCommand => write!(f, "empty command"),
            ModelError::UnknownCommand(msg) => {
                write!(f, "unknown command: '{msg}'")
            }
            ModelError::UnknownPanel(id) => write!(f, "unknown panel: '{id}'"),
            ModelError::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
