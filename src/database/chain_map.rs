//! Цепная хеш-таблица строк (ChainMap).
//!
//! Каждый бакет владеет односвязной цепочкой записей; новая запись
//! добавляется в голову цепочки. Когда заполненность превышает 3/4,
//! число бакетов удваивается, а записи перелинковываются без копирования.

use std::{
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{string_hash::raw_hash, wire};
use crate::error::{StoreError, StoreResult};

const DEFAULT_BUCKETS: usize = 8;

/// Один элемент в цепочке коллизий.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
    next: Option<Box<Entry>>,
}

/// Словарь строка → строка на цепочках.
///
/// Инварианты: не больше одной записи на ключ, `element_count` равен
/// числу живых записей, бакетов всегда хотя бы один.
#[derive(Debug, Clone)]
pub struct ChainMap {
    buckets: Vec<Option<Box<Entry>>>,
    element_count: usize,
}

pub struct ChainMapIter<'a> {
    buckets: &'a [Option<Box<Entry>>],
    bucket_idx: usize,
    current: Option<&'a Entry>,
}

impl Default for ChainMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainMap {
    /// Новая таблица с восемью бакетами.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Таблица с заданным числом бакетов (минимум один).
    pub fn with_buckets(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        ChainMap {
            buckets,
            element_count: 0,
        }
    }

    /// Число живых записей.
    pub fn len(&self) -> usize {
        self.element_count
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Текущее число бакетов.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Освобождает все цепочки; число бакетов сохраняется.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.element_count = 0;
    }

    fn bucket_index(&self, key: &str) -> usize {
        (raw_hash(key) % self.buckets.len() as u64) as usize
    }

    /// Вставляет пару. Существующий ключ перезаписывается на месте без
    /// изменения размера; после настоящей вставки срабатывает проверка
    /// роста: element_count * 4 > bucket_count * 3.
    pub fn insert(&mut self, key: &str, value: &str) {
        let index = self.bucket_index(key);

        let mut cur = &mut self.buckets[index];
        while let Some(entry) = cur {
            if entry.key == key {
                entry.value = value.to_string();
                return;
            }
            cur = &mut entry.next;
        }

        // новое звено в голову цепочки
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            key: key.to_string(),
            value: value.to_string(),
            next,
        }));
        self.element_count += 1;

        if self.element_count * 4 > self.buckets.len() * 3 {
            self.rehash(self.buckets.len() * 2);
        }
    }

    /// Перелинковывает записи в новый массив бакетов. Записи, попавшие
    /// в один новый бакет, оказываются в обратном порядке обхода старой
    /// цепочки — наблюдаемое свойство формата, не дефект.
    fn rehash(&mut self, new_bucket_count: usize) {
        let new_bucket_count = new_bucket_count.max(1);
        let mut fresh = Vec::with_capacity(new_bucket_count);
        fresh.resize_with(new_bucket_count, || None);
        let old_buckets = std::mem::replace(&mut self.buckets, fresh);

        for mut chain in old_buckets {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let index = self.bucket_index(&entry.key);
                entry.next = self.buckets[index].take();
                self.buckets[index] = Some(entry);
            }
        }
    }

    /// Удаляет запись по ключу; отсутствующий ключ — no-op.
    pub fn erase(&mut self, key: &str) {
        let index = self.bucket_index(key);
        let chain = self.buckets[index].take();
        let (chain, removed) = Self::remove_from_chain(chain, key);
        self.buckets[index] = chain;
        if removed {
            self.element_count -= 1;
        }
    }

    /// Разбирает цепочку и выкидывает первое звено с ключом `key`.
    fn remove_from_chain(chain: Option<Box<Entry>>, key: &str) -> (Option<Box<Entry>>, bool) {
        match chain {
            None => (None, false),
            Some(mut entry) => {
                if entry.key == key {
                    (entry.next.take(), true)
                } else {
                    let (rest, removed) = Self::remove_from_chain(entry.next.take(), key);
                    entry.next = rest;
                    (Some(entry), removed)
                }
            }
        }
    }

    /// Значение по ключу или None.
    pub fn find(&self, key: &str) -> Option<&str> {
        let index = self.bucket_index(key);
        let mut cur = self.buckets[index].as_deref();
        while let Some(entry) = cur {
            if entry.key == key {
                return Some(&entry.value);
            }
            cur = entry.next.as_deref();
        }
        None
    }

    /// Ссылка на значение ключа; отсутствующий ключ сначала получает
    /// пустую строку (чтение по отсутствующему ключу — это ещё и запись).
    pub fn entry_or_default(&mut self, key: &str) -> &mut String {
        if self.find(key).is_none() {
            self.insert(key, "");
        }
        let index = self.bucket_index(key);
        Self::find_in_chain_mut(&mut self.buckets[index], key)
            .expect("entry exists right after insert")
    }

    fn find_in_chain_mut<'a>(
        chain: &'a mut Option<Box<Entry>>,
        key: &str,
    ) -> Option<&'a mut String> {
        let mut cur = chain;
        while let Some(entry) = cur {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            cur = &mut entry.next;
        }
        None
    }

    pub fn iter(&self) -> ChainMapIter<'_> {
        ChainMapIter {
            buckets: &self.buckets,
            bucket_idx: 0,
            current: None,
        }
    }

    // ---------- текстовая сериализация ----------

    /// Первая строка — число живых записей, далее `ключ<TAB>значение`.
    pub fn serialize_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.element_count.to_string());
        out.push('\n');
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('\t');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Загружает таблицу из текстовой записи. Нечисловой счётчик читается
    /// как пустая таблица; нехватка строк или отсутствие табуляции — это
    /// ошибка, и таблица остаётся пустой.
    pub fn deserialize_text(&mut self, data: &str) -> StoreResult<()> {
        self.clear();

        let mut lines = data.lines();
        let declared = match wire::parse_count_line(lines.next()) {
            Some(n) => n,
            None => return Ok(()),
        };

        let mut entries = Vec::new();
        for _ in 0..declared {
            let line = lines
                .next()
                .ok_or_else(|| StoreError::MalformedStream("cannot read key".into()))?;
            let (key, value) = line
                .split_once('\t')
                .ok_or_else(|| StoreError::MalformedStream("cannot read value".into()))?;
            entries.push((key.to_string(), value.to_string()));
        }

        for (key, value) in entries {
            self.insert_tail_raw(key, value);
        }
        Ok(())
    }

    /// Вставка в хвост цепочки без проверки роста: загрузка дампа
    /// сохраняет порядок записей внутри бакета как в файле.
    fn insert_tail_raw(&mut self, key: String, value: String) {
        let index = self.bucket_index(&key);
        let mut cur = &mut self.buckets[index];
        while let Some(entry) = cur {
            cur = &mut entry.next;
        }
        *cur = Some(Box::new(Entry {
            key,
            value,
            next: None,
        }));
        self.element_count += 1;
    }

    // ---------- бинарная сериализация ----------

    /// u64-счётчик записей, затем на запись u64-длина ключа с байтами и
    /// u64-длина значения с байтами.
    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        w.write_u64::<BigEndian>(self.element_count as u64)?;
        for (key, value) in self.iter() {
            wire::write_string(w, key)?;
            wire::write_string(w, value)?;
        }
        Ok(())
    }

    /// Загружает таблицу из бинарного потока обычными вставками. При
    /// ошибке состояние может остаться заполненным до сбойной записи —
    /// вызывающая сторона отбрасывает таблицу.
    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        self.clear();
        let count = wire::read_u64(r, "entry count")?;
        for _ in 0..count {
            let key = wire::read_string(r, "key")?;
            let value = wire::read_string(r, "value")?;
            self.insert(&key, &value);
        }
        Ok(())
    }
}

impl<'a> Iterator for ChainMapIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.take() {
                self.current = entry.next.as_deref();
                return Some((&entry.key, &entry.value));
            }
            if self.bucket_idx >= self.buckets.len() {
                return None;
            }
            self.current = self.buckets[self.bucket_idx].as_deref();
            self.bucket_idx += 1;
        }
    }
}

impl<'a> IntoIterator for &'a ChainMap {
    type Item = (&'a str, &'a str);
    type IntoIter = ChainMapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ChainMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ChainMap(size={}, buckets={})",
            self.element_count,
            self.buckets.len()
        )?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "  [{i}]:")?;
            let mut cur = bucket.as_deref();
            while let Some(entry) = cur {
                write!(f, " ({} -> {})", entry.key, entry.value)?;
                cur = entry.next.as_deref();
                if cur.is_some() {
                    write!(f, " ->")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for ChainMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<(&str, &str)> = self.iter().collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChainMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(String, String)>::deserialize(deserializer)?;
        let mut map = ChainMap::new();
        for (key, value) in &entries {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Проверяет базовые операции вставки и поиска.
    #[test]
    fn basic_insert_find() {
        let mut map = ChainMap::new();
        map.insert("a", "1");
        map.insert("b", "2");

        assert_eq!(map.find("a"), Some("1"));
        assert_eq!(map.find("b"), Some("2"));
        assert_eq!(map.find("c"), None);
        assert_eq!(map.len(), 2);
    }

    /// Повторная вставка перезаписывает значение на месте.
    #[test]
    fn insert_overwrites_existing_key() {
        let mut map = ChainMap::new();
        map.insert("key", "old");
        map.insert("key", "new");

        assert_eq!(map.len(), 1);
        assert_eq!(map.find("key"), Some("new"));
    }

    #[test]
    fn erase_and_erase_absent() {
        let mut map = ChainMap::new();
        map.insert("x", "100");
        map.erase("x");

        assert_eq!(map.find("x"), None);
        assert_eq!(map.len(), 0);

        map.erase("x"); // no-op
        assert_eq!(map.len(), 0);
    }

    /// Три ключа в таблице на два бакета: рост срабатывает хотя бы раз,
    /// все ключи остаются на месте.
    #[test]
    fn three_keys_double_two_buckets() {
        let mut map = ChainMap::with_buckets(2);
        map.insert("k1", "v1");
        map.insert("k2", "v2");
        map.insert("k3", "v3");

        assert!(map.bucket_count() >= 4);
        assert_eq!(map.find("k1"), Some("v1"));
        assert_eq!(map.find("k2"), Some("v2"));
        assert_eq!(map.find("k3"), Some("v3"));
    }

    /// Рост с двух бакетов: заполненность после вставки не превышает 3/4.
    #[test]
    fn growth_keeps_load_factor_bounded() {
        let mut map = ChainMap::with_buckets(2);
        let mut last_buckets = map.bucket_count();

        for i in 0..50 {
            map.insert(&format!("k{i}"), &format!("v{i}"));
            assert!(map.bucket_count() >= last_buckets);
            last_buckets = map.bucket_count();
            assert!(map.len() * 4 <= map.bucket_count() * 3);
        }
        for i in 0..50 {
            assert_eq!(map.find(&format!("k{i}")).map(str::to_owned), Some(format!("v{i}")));
        }
    }

    /// Чтение по отсутствующему ключу через entry_or_default — это запись.
    #[test]
    fn entry_or_default_inserts_empty_value() {
        let mut map = ChainMap::new();
        assert_eq!(map.entry_or_default("ghost"), "");
        assert_eq!(map.len(), 1);

        *map.entry_or_default("ghost") = "seen".to_string();
        assert_eq!(map.find("ghost"), Some("seen"));
    }

    #[test]
    fn clear_keeps_bucket_count() {
        let mut map = ChainMap::with_buckets(4);
        map.insert("a", "1");
        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.bucket_count(), 4);
        assert_eq!(map.find("a"), None);
    }

    #[test]
    fn text_roundtrip() {
        let mut map = ChainMap::with_buckets(2);
        map.insert("alpha", "1");
        map.insert("beta", "two words");
        map.insert("gamma", "");

        let text = map.serialize_text();
        let mut restored = ChainMap::new();
        restored.deserialize_text(&text).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.find("alpha"), Some("1"));
        assert_eq!(restored.find("beta"), Some("two words"));
        assert_eq!(restored.find("gamma"), Some(""));
        assert_eq!(restored.find("delta"), None);
    }

    /// Нечисловой счётчик — пустая таблица без ошибки.
    #[test]
    fn text_non_numeric_count_is_empty_table() {
        let mut map = ChainMap::new();
        map.insert("stale", "1");
        map.deserialize_text("oops\n").unwrap();
        assert!(map.is_empty());
    }

    /// Нехватка заявленных строк — ошибка, таблица остаётся пустой.
    #[test]
    fn text_missing_lines_is_error() {
        let mut map = ChainMap::new();
        let err = map.deserialize_text("3\nk1\tv1\n");
        assert!(matches!(err, Err(StoreError::MalformedStream(_))));
        assert!(map.is_empty());
    }

    /// Строка без табуляции — ошибка.
    #[test]
    fn text_line_without_tab_is_error() {
        let mut map = ChainMap::new();
        let err = map.deserialize_text("1\nno-tab-here\n");
        assert!(matches!(err, Err(StoreError::MalformedStream(_))));
        assert!(map.is_empty());
    }

    #[test]
    fn binary_roundtrip() {
        let mut map = ChainMap::new();
        map.insert("one", "1");
        map.insert("two", "2");
        map.insert("", "empty key");

        let mut buf = Vec::new();
        map.write_binary(&mut buf).unwrap();

        let mut restored = ChainMap::new();
        restored.read_binary(&mut buf.as_slice()).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.find("one"), Some("1"));
        assert_eq!(restored.find("two"), Some("2"));
        assert_eq!(restored.find(""), Some("empty key"));
    }

    #[test]
    fn binary_truncated_stream_is_error() {
        let mut map = ChainMap::new();
        map.insert("k", "v");

        let mut buf = Vec::new();
        map.write_binary(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);

        let mut restored = ChainMap::new();
        let err = restored.read_binary(&mut buf.as_slice());
        assert!(matches!(err, Err(StoreError::MalformedStream(_))));
    }

    /// Итератор обходит все живые записи ровно по одному разу.
    #[test]
    fn iteration_covers_all_entries() {
        let mut map = ChainMap::with_buckets(2);
        map.insert("x", "1");
        map.insert("y", "2");
        map.insert("z", "3");

        let mut seen: Vec<(String, String)> = map
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "2".to_string()),
                ("z".to_string(), "3".to_string()),
            ]
        );
    }
}
