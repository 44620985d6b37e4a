//! Дамп всех именованных коллекций (формат SDB).
//!
//! Текстовый вариант: на запись — заголовок `ВИД имя`, каноническая
//! текстовая сериализация коллекции и строка-терминатор `END$`.
//! Бинарный вариант: magic и версия, u32-счётчик записей, затем на
//! запись тег вида, имя и длина полезной нагрузки с самой нагрузкой.

pub mod decode;
pub mod encode;
pub mod file;
pub mod tags;

pub use decode::{load_store_binary, load_store_text};
pub use encode::{save_store_binary, save_store_text};
pub use file::{autoload, load_from_sdb, load_from_text, save_to_sdb, save_to_text};

pub const FILE_MAGIC: &[u8; 3] = b"SDB";
pub const DUMP_VERSION: u8 = 1;

/// Терминатор записи в текстовом дампе.
pub const TEXT_RECORD_END: &str = "END$";
