//! Стек строк (LIFO).

use std::{
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::wire;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    items: Vec<String>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
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
        self.items.push(value.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.items.pop()
    }

    /// Верхний элемент без извлечения.
    pub fn peek(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    /// Итератор от дна к вершине.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    // ---------- сериализация ----------

    /// Первая строка — число элементов, далее от дна к вершине.
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
            self.items.push(wire::read_string(r, "item")?);
        }
        Ok(())
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack(size={}, top last):", self.items.len())?;
        for value in &self.items {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut stack = Stack::new();
        stack.push("first");
        stack.push("second");

        assert_eq!(stack.peek(), Some("second"));
        let bottom_up: Vec<&str> = stack.iter().collect();
        assert_eq!(bottom_up, ["first", "second"]);
        assert_eq!(stack.pop(), Some("second".to_string()));
        assert_eq!(stack.pop(), Some("first".to_string()));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn text_and_binary_roundtrip() {
        let mut stack = Stack::new();
        stack.push("bottom");
        stack.push("top");

        let mut from_text = Stack::new();
        from_text.deserialize_text(&stack.serialize_text()).unwrap();
        assert_eq!(from_text, stack);
        assert_eq!(from_text.peek(), Some("top"));

        let mut buf = Vec::new();
        stack.write_binary(&mut buf).unwrap();
        let mut from_binary = Stack::new();
        from_binary.read_binary(&mut buf.as_slice()).unwrap();
        assert_eq!(from_binary, stack);
    }

    #[test]
    fn text_truncated_is_error() {
        let mut stack = Stack::new();
        assert!(matches!(
            stack.deserialize_text("2\nonly\n"),
            Err(StoreError::MalformedStream(_))
        ));
        assert!(stack.is_empty());
    }
}
