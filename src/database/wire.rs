//! Общие помощники бинарного формата контейнеров.
//!
//! Все числовые поля пишутся фиксированной ширины в big-endian.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{StoreError, StoreResult};

/// Пишет строку как u64-длину и сырые UTF-8 байты.
pub(crate) fn write_string<W: Write>(w: &mut W, s: &str) -> StoreResult<()> {
    w.write_u64::<BigEndian>(s.len() as u64)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

pub(crate) fn read_u64<R: Read>(r: &mut R, what: &str) -> StoreResult<u64> {
    r.read_u64::<BigEndian>()
        .map_err(|_| StoreError::MalformedStream(format!("cannot read {what}")))
}

pub(crate) fn read_string<R: Read>(r: &mut R, what: &str) -> StoreResult<String> {
    let len = read_u64(r, what)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)
        .map_err(|_| StoreError::MalformedStream(format!("cannot read {what} data")))?;
    String::from_utf8(buf)
        .map_err(|_| StoreError::MalformedStream(format!("{what} is not valid UTF-8")))
}

/// Первый токен первой строки как десятичный счётчик.
/// Нечисловой или отсутствующий токен — это `None`, не ошибка.
pub(crate) fn parse_count_line(line: Option<&str>) -> Option<usize> {
    line.and_then(|l| l.split_whitespace().next())
        .and_then(|token| token.parse().ok())
}
