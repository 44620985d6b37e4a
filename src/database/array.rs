//! Динамический массив строк.

use std::{
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::wire;
use crate::error::{StoreError, StoreResult};

/// Массив с доступом по индексу; расширяется сам по мере роста.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Array {
    items: Vec<String>,
}

impl Array {
    pub fn new() -> Self {
        Array { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push_back(&mut self, value: &str) {
        self.items.push(value.to_string());
    }

    /// Вставка со сдвигом хвоста; индекс может равняться длине.
    pub fn insert(&mut self, index: usize, value: &str) -> StoreResult<()> {
        if index > self.items.len() {
            return Err(StoreError::IndexOutOfBounds);
        }
        self.items.insert(index, value.to_string());
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.items.len() {
            return Err(StoreError::IndexOutOfBounds);
        }
        self.items.remove(index);
        Ok(())
    }

    pub fn set(&mut self, index: usize, value: &str) -> StoreResult<()> {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(StoreError::IndexOutOfBounds),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    // ---------- сериализация ----------

    /// Первая строка — число элементов, далее по элементу на строку.
    pub fn serialize_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.items.len().to_string());
        out.push('\n');
        for item in &self.items {
            out.push_str(item);
            out.push('\n');
        }
        out
    }

    /// Загружает массив из текстовой записи. Нечитаемый счётчик или
    /// нехватка строк — ошибка, массив остаётся пустым.
    pub fn deserialize_text(&mut self, data: &str) -> StoreResult<()> {
        self.clear();

        let mut lines = data.lines();
        let declared = wire::parse_count_line(lines.next())
            .ok_or_else(|| StoreError::MalformedStream("cannot read length".into()))?;

        let mut items = Vec::with_capacity(declared.min(1024));
        for _ in 0..declared {
            let line = lines
                .next()
                .ok_or_else(|| StoreError::MalformedStream("not enough lines".into()))?;
            items.push(line.to_string());
        }
        self.items = items;
        Ok(())
    }

    /// u64-счётчик, затем u64-длина и байты каждого элемента.
    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        w.write_u64::<BigEndian>(self.items.len() as u64)?;
        for item in &self.items {
            wire::write_string(w, item)?;
        }
        Ok(())
    }

    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        self.clear();
        let count = wire::read_u64(r, "length")?;
        for _ in 0..count {
            self.items.push(wire::read_string(r, "item")?);
        }
        Ok(())
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array(size={}):", self.items.len())?;
        for item in &self.items {
            write!(f, " {item}")?;
        }
        Ok(())
    }
}
