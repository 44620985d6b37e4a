/// Line-protocol commands and their execution over the store.
pub mod command;
/// Process configuration loading.
pub mod config;
/// Built-in data structures (AvlTree, ChainMap, OpenMap and the sequential containers).
pub mod database;
/// Named collection store and the SDB dump formats.
pub mod engine;
/// Common error types: parsing, streams, storage.
pub mod error;
/// Logging initialization.
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Command parsing and execution.
pub use command::{parse, CommandExecute, Reply};
/// Process settings.
pub use config::Settings;
/// Data types: AvlTree, ChainMap, OpenMap and the sequential containers.
pub use database::{Array, AvlTree, ChainMap, ForwardList, List, OpenMap, Queue, Stack};
/// Named collection store and dump helpers.
pub use engine::{
    autoload, load_from_sdb, load_from_text, save_to_sdb, save_to_text, Collection,
    CollectionKind, Store,
};
/// Operation errors and result types.
pub use error::{ParseError, StoreError, StoreResult};
