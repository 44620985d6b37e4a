//! Хеш-таблица строк с открытой адресацией (OpenMap).
//!
//! Коллизии разрешаются линейным пробированием с заворотом по кругу.
//! Удаление отложенное: слот помечается tombstone и остаётся занятым,
//! чтобы не рвать чужие последовательности проб; место возвращается
//! при следующем рехеше.

use std::{
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{string_hash::raw_hash, wire};
use crate::error::{StoreError, StoreResult};

const DEFAULT_CAPACITY: usize = 8;

/// Слот таблицы. Никогда не записанный слот — `is_occupied == false`;
/// удалённый остаётся занятым с `is_deleted == true` до рехеша.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slot {
    key: String,
    value: String,
    is_occupied: bool,
    is_deleted: bool,
}

impl Slot {
    fn is_live(&self) -> bool {
        self.is_occupied && !self.is_deleted
    }
}

/// Словарь строка → строка на плоском массиве слотов.
#[derive(Debug, Clone)]
pub struct OpenMap {
    slots: Vec<Slot>,
    element_count: usize,
}

impl Default for OpenMap {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMap {
    /// Новая таблица на восемь слотов.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Таблица заданной ёмкости (минимум один слот).
    pub fn with_capacity(capacity: usize) -> Self {
        OpenMap {
            slots: vec![Slot::default(); capacity.max(1)],
            element_count: 0,
        }
    }

    /// Число живых записей (занятых и не удалённых слотов).
    pub fn len(&self) -> usize {
        self.element_count
    }

    /// Returns `true` if the map has no live entries.
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Текущая ёмкость массива слотов.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Сбрасывает все слоты; ёмкость сохраняется.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::default();
        }
        self.element_count = 0;
    }

    fn slot_index(&self, key: &str) -> usize {
        (raw_hash(key) % self.slots.len() as u64) as usize
    }

    /// Слот для вставки: первый пустой, tombstone или слот того же ключа.
    /// Возврат в стартовый индекс означает «таблица заполнена» — проба
    /// ограничена одним полным кругом.
    fn find_slot_for_insert(&self, key: &str) -> usize {
        let start = self.slot_index(key);
        let mut index = start;
        loop {
            let slot = &self.slots[index];
            if !slot.is_occupied || slot.is_deleted || slot.key == key {
                return index;
            }
            index = (index + 1) % self.slots.len();
            if index == start {
                return index;
            }
        }
    }

    /// Слот живой записи с данным ключом. Проба не останавливается на
    /// tombstone (за ним могут лежать записи, вставленные позже), но
    /// никогда не записанный слот обрывает поиск.
    fn find_slot_for_key(&self, key: &str) -> Option<usize> {
        let start = self.slot_index(key);
        let mut index = start;
        while self.slots[index].is_occupied {
            let slot = &self.slots[index];
            if !slot.is_deleted && slot.key == key {
                return Some(index);
            }
            index = (index + 1) % self.slots.len();
            if index == start {
                break;
            }
        }
        None
    }

    /// Вставляет пару. Проверка роста срабатывает до размещения:
    /// element_count * 2 >= capacity удваивает таблицу заранее.
    pub fn insert(&mut self, key: &str, value: &str) {
        if self.element_count * 2 >= self.slots.len() {
            self.rehash(self.slots.len() * 2);
        }

        let index = self.find_slot_for_insert(key);
        let slot = &mut self.slots[index];

        if slot.is_live() {
            // ключ уже есть — перезапись на месте
            slot.value = value.to_string();
            return;
        }

        slot.key = key.to_string();
        slot.value = value.to_string();
        slot.is_occupied = true;
        slot.is_deleted = false;
        self.element_count += 1;
    }

    /// Переносит в новый массив только живые записи: tombstone и пустые
    /// слоты при рехеше исчезают.
    fn rehash(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.max(1);
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::default(); new_capacity]);
        self.element_count = 0;
        for slot in old_slots {
            if slot.is_live() {
                self.insert(&slot.key, &slot.value);
            }
        }
    }

    /// Помечает запись удалённой; слот остаётся занятым до рехеша.
    pub fn erase(&mut self, key: &str) {
        if let Some(index) = self.find_slot_for_key(key) {
            self.slots[index].is_deleted = true;
            self.element_count -= 1;
        }
    }

    /// Значение по ключу или None.
    pub fn find(&self, key: &str) -> Option<&str> {
        self.find_slot_for_key(key)
            .map(|index| self.slots[index].value.as_str())
    }

    /// Ссылка на значение ключа; отсутствующий ключ сначала получает
    /// пустую строку (чтение по отсутствующему ключу — это ещё и запись).
    pub fn entry_or_default(&mut self, key: &str) -> &mut String {
        if self.find_slot_for_key(key).is_none() {
            self.insert(key, "");
        }
        let index = self
            .find_slot_for_key(key)
            .expect("entry exists right after insert");
        &mut self.slots[index].value
    }

    /// Итератор по живым записям в порядке слотов.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots
            .iter()
            .filter(|slot| slot.is_live())
            .map(|slot| (slot.key.as_str(), slot.value.as_str()))
    }

    // ---------- текстовая сериализация ----------

    /// Первая строка — число живых записей, далее `ключ<TAB>значение`.
    /// Tombstone в дамп не попадают.
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

    /// Загружает таблицу из текстовой записи; семантика счётчика и ошибок
    /// как у [`ChainMap`](super::ChainMap).
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
            self.insert(&key, &value);
        }
        Ok(())
    }

    // ---------- бинарная сериализация ----------

    /// u64-счётчик живых записей, затем пары строк с u64-длинами.
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

impl fmt::Display for OpenMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "OpenMap(size={}, capacity={})",
            self.element_count,
            self.slots.len()
        )?;
        for (i, slot) in self.slots.iter().enumerate() {
            if !slot.is_occupied {
                writeln!(f, "  [{i}]: EMPTY")?;
            } else if slot.is_deleted {
                writeln!(f, "  [{i}]: DELETED")?;
            } else {
                writeln!(f, "  [{i}]: ({} -> {})", slot.key, slot.value)?;
            }
        }
        Ok(())
    }
}

impl Serialize for OpenMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<(&str, &str)> = self.iter().collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OpenMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(String, String)>::deserialize(deserializer)?;
        let mut map = OpenMap::new();
        for (key, value) in &entries {
            map.insert(key, value);
        }
        Ok(map)
    }
}
