use thiserror::Error;

/// Ошибки разбора строки команды.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Wrong number of arguments: expected at least {expected}, got {got}")]
    WrongArgumentCount { expected: usize, got: usize },

    #[error("Invalid index: {0}")]
    BadIndex(String),

    #[error("Invalid position: {0} (expected HEAD or TAIL)")]
    BadPlace(String),
}
