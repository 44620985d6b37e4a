pub mod sdb;
pub mod store;

pub use sdb::{autoload, load_from_sdb, load_from_text, save_to_sdb, save_to_text};
pub use store::{Collection, CollectionKind, Store, MAX_COLLECTIONS};
