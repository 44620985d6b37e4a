//! Очередь строк (FIFO).

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
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    pub fn new() -> Self {
        Queue {
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

    pub fn push(&mut self, value: &str) {
        self.items.push_back(value.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// Первый в очереди без извлечения.
    pub fn front(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    /// Итератор от головы очереди к хвосту.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    // ---------- сериализация ----------

    /// Первая строка — число элементов, далее от головы к хвосту.
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

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queue(size={}, front first):", self.items.len())?;
        for value in &self.items {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}
