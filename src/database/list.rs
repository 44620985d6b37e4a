//! Двусвязный список строк.
//!
//! Обе стороны доступны за O(1); хранение поверх VecDeque, позиционные
//! операции работают по первому вхождению якорного значения.

use std::{
    collections::VecDeque,
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::wire;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    items: VecDeque<String>,
}

impl List {
    pub fn new() -> Self {
        List {
            items: VecDeque::new(),
        }
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

    pub fn push_front(&mut self, value: &str) {
        self.items.push_front(value.to_string());
    }

    pub fn push_back(&mut self, value: &str) {
        self.items.push_back(value.to_string());
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<String> {
        self.items.pop_back()
    }

    /// Удаляет первое вхождение значения.
    pub fn remove_by_value(&mut self, value: &str) -> bool {
        match self.items.iter().position(|v| v == value) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|v| v == value)
    }

    pub fn insert_after(&mut self, anchor: &str, value: &str) -> bool {
        match self.items.iter().position(|v| v == anchor) {
            Some(index) => {
                self.items.insert(index + 1, value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn insert_before(&mut self, anchor: &str, value: &str) -> bool {
        match self.items.iter().position(|v| v == anchor) {
            Some(index) => {
                self.items.insert(index, value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_after(&mut self, anchor: &str) -> bool {
        match self.items.iter().position(|v| v == anchor) {
            Some(index) if index + 1 < self.items.len() => {
                self.items.remove(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn remove_before(&mut self, anchor: &str) -> bool {
        match self.items.iter().position(|v| v == anchor) {
            Some(index) if index > 0 => {
                self.items.remove(index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    // ---------- сериализация ----------

    pub fn serialize_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.items.len().to_string());
        out.push('\n');
        for value in &self.items {
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn deserialize_text(&mut self, data: &str) -> StoreResult<()> {
        self.clear();

        let mut lines = data.lines();
        let declared = wire::parse_count_line(lines.next())
            .ok_or_else(|| StoreError::MalformedStream("cannot read length".into()))?;

        let mut items = VecDeque::with_capacity(declared.min(1024));
        for _ in 0..declared {
            let line = lines
                .next()
                .ok_or_else(|| StoreError::MalformedStream("not enough lines".into()))?;
            items.push_back(line.to_string());
        }
        self.items = items;
        Ok(())
    }

    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        w.write_u64::<BigEndian>(self.items.len() as u64)?;
        for value in &self.items {
            wire::write_string(w, value)?;
        }
        Ok(())
    }

    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        self.clear();
        let count = wire::read_u64(r, "length")?;
        for _ in 0..count {
            self.items.push_back(wire::read_string(r, "item")?);
        }
        Ok(())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List(size={}):", self.items.len())?;
        for value in &self.items {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}
