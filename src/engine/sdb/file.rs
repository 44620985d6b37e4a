//! Сохранение и загрузка дампа через файлы.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::{debug, info, warn};

use super::{decode, encode};
use crate::{engine::store::Store, error::StoreResult};

pub fn save_to_sdb(path: &Path, store: &Store) -> StoreResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode::save_store_binary(&mut writer, store)?;
    writer.flush()?;
    debug!(path = %path.display(), records = store.len(), "binary dump saved");
    Ok(())
}

pub fn load_from_sdb(path: &Path) -> StoreResult<Store> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let store = decode::load_store_binary(&mut reader)?;
    info!(path = %path.display(), records = store.len(), "binary dump loaded");
    Ok(store)
}

pub fn save_to_text(path: &Path, store: &Store) -> StoreResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode::save_store_text(&mut writer, store)?;
    writer.flush()?;
    debug!(path = %path.display(), records = store.len(), "text dump saved");
    Ok(())
}

pub fn load_from_text(path: &Path) -> StoreResult<Store> {
    let data = fs::read_to_string(path)?;
    let store = decode::load_store_text(&data)?;
    info!(path = %path.display(), records = store.len(), "text dump loaded");
    Ok(store)
}

/// Восстанавливает хранилище при старте: бинарный дамп в приоритете,
/// затем текстовый; испорченный дамп отбрасывается целиком, и если
/// загрузить нечего — хранилище начинается пустым.
pub fn autoload(binary: &Path, text: &Path) -> Store {
    if binary.exists() {
        match load_from_sdb(binary) {
            Ok(store) => return store,
            Err(err) => warn!(%err, "binary dump rejected"),
        }
    }

    if text.exists() {
        match load_from_text(text) {
            Ok(store) => return store,
            Err(err) => warn!(%err, "text dump rejected"),
        }
    }

    debug!("starting with an empty store");
    Store::new()
}
