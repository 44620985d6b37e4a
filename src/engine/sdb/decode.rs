//! Чтение дампа хранилища из потока.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use super::{tags, DUMP_VERSION, FILE_MAGIC, TEXT_RECORD_END};
use crate::{
    engine::store::{Collection, Store},
    error::{StoreError, StoreResult},
};

/// Восстанавливает хранилище из текстового дампа. Записи неизвестного
/// вида пропускаются; повреждённая запись — ошибка всего дампа.
pub fn load_store_text(data: &str) -> StoreResult<Store> {
    let mut store = Store::new();
    let mut lines = data.lines();

    while let Some(header) = lines.next() {
        if header.is_empty() {
            continue;
        }

        let mut parts = header.split_whitespace();
        let (kind_name, name) = match (parts.next(), parts.next()) {
            (Some(kind), Some(name)) => (kind, name),
            _ => continue,
        };

        let mut content = String::new();
        for line in lines.by_ref() {
            if line == TEXT_RECORD_END {
                break;
            }
            content.push_str(line);
            content.push('\n');
        }

        let Some(kind) = tags::kind_by_name(kind_name) else {
            continue;
        };
        let mut collection = Collection::new_of(kind);
        collection.deserialize_text(&content)?;
        store.insert(name, collection)?;
    }

    Ok(store)
}

/// Восстанавливает хранилище из бинарного дампа. Любая ошибка чтения
/// отбрасывает весь дамп — частично загруженное хранилище наружу не
/// отдаётся.
pub fn load_store_binary<R: Read>(r: &mut R) -> StoreResult<Store> {
    let mut magic = [0u8; 3];
    r.read_exact(&mut magic)
        .map_err(|_| StoreError::MalformedStream("cannot read magic".into()))?;
    if &magic != FILE_MAGIC {
        return Err(StoreError::MalformedStream("bad magic".into()));
    }

    let version = r
        .read_u8()
        .map_err(|_| StoreError::MalformedStream("cannot read version".into()))?;
    if version != DUMP_VERSION {
        return Err(StoreError::MalformedStream(format!(
            "unsupported dump version {version}"
        )));
    }

    let count = r
        .read_u32::<BigEndian>()
        .map_err(|_| StoreError::MalformedStream("cannot read record count".into()))?;

    let mut store = Store::new();
    for _ in 0..count {
        let tag = r
            .read_u8()
            .map_err(|_| StoreError::MalformedStream("cannot read record tag".into()))?;
        let kind = tags::kind_of(tag)
            .ok_or_else(|| StoreError::MalformedStream(format!("unknown record tag {tag}")))?;

        let name = read_sized_string(r, "record name")?;
        let payload = read_sized_bytes(r, "record payload")?;

        let mut collection = Collection::new_of(kind);
        collection.read_binary(&mut payload.as_slice())?;
        store.insert(&name, collection)?;
    }

    Ok(store)
}

fn read_sized_bytes<R: Read>(r: &mut R, what: &str) -> StoreResult<Vec<u8>> {
    let len = r
        .read_u32::<BigEndian>()
        .map_err(|_| StoreError::MalformedStream(format!("cannot read {what} length")))?;
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)
        .map_err(|_| StoreError::MalformedStream(format!("cannot read {what}")))?;
    Ok(buf)
}

fn read_sized_string<R: Read>(r: &mut R, what: &str) -> StoreResult<String> {
    String::from_utf8(read_sized_bytes(r, what)?)
        .map_err(|_| StoreError::MalformedStream(format!("{what} is not valid UTF-8")))
}
