use std::io;

use thiserror::Error;

use super::ParseError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    // ==== System / External ====
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Повреждённый поток: счётчик/длина не читаются или данные
    /// закончились раньше заявленного количества.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    // ==== Command errors ====
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Wrong type for operation: {0}")]
    WrongType(String),

    #[error("Index out of bounds")]
    IndexOutOfBounds,

    // ==== General ====
    #[error("Store is full: {0} collections max")]
    StoreFull(usize),
}
