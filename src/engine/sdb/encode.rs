//! Запись дампа хранилища в поток.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{tags, DUMP_VERSION, FILE_MAGIC, TEXT_RECORD_END};
use crate::{engine::store::Store, error::StoreResult};

/// Текстовый дамп: `ВИД имя`, сериализация коллекции, `END$`.
pub fn save_store_text<W: Write>(w: &mut W, store: &Store) -> StoreResult<()> {
    for (name, collection) in store.iter() {
        writeln!(w, "{} {}", tags::name_of(collection.kind()), name)?;
        w.write_all(collection.serialize_text().as_bytes())?;
        writeln!(w, "{TEXT_RECORD_END}")?;
    }
    Ok(())
}

/// Бинарный дамп: magic, версия, u32-счётчик записей; на запись — тег
/// вида, u32-длина имени с байтами, u32-длина полезной нагрузки с её
/// байтами (бинарная сериализация коллекции).
pub fn save_store_binary<W: Write>(w: &mut W, store: &Store) -> StoreResult<()> {
    w.write_all(FILE_MAGIC)?;
    w.write_u8(DUMP_VERSION)?;
    w.write_u32::<BigEndian>(store.len() as u32)?;

    for (name, collection) in store.iter() {
        w.write_u8(tags::tag_of(collection.kind()))?;

        w.write_u32::<BigEndian>(name.len() as u32)?;
        w.write_all(name.as_bytes())?;

        let mut payload = Vec::new();
        collection.write_binary(&mut payload)?;
        w.write_u32::<BigEndian>(payload.len() as u32)?;
        w.write_all(&payload)?;
    }
    Ok(())
}
