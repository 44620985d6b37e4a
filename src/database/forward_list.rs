//! Односвязный список строк.
//!
//! Голова владеет цепочкой узлов; позиционные операции ищут якорное
//! значение линейным проходом и молча ничего не делают, если его нет.

use std::{
    fmt,
    io::{Read, Write},
};

use byteorder::{BigEndian, WriteBytesExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct FNode {
    value: String,
    next: Option<Box<FNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardList {
    head: Option<Box<FNode>>,
    length: usize,
}

/// Итератор по значениям от головы к хвосту.
pub struct ForwardListIter<'a> {
    current: Option<&'a FNode>,
}

impl ForwardList {
    pub fn new() -> Self {
        ForwardList {
            head: None,
            length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn clear(&mut self) {
        // итеративно, чтобы не зависеть от глубины рекурсии drop
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
        self.length = 0;
    }

    pub fn push_front(&mut self, value: &str) {
        let next = self.head.take();
        self.head = Some(Box::new(FNode {
            value: value.to_string(),
            next,
        }));
        self.length += 1;
    }

    pub fn push_back(&mut self, value: &str) {
        let mut cur = &mut self.head;
        while let Some(node) = cur {
            cur = &mut node.next;
        }
        *cur = Some(Box::new(FNode {
            value: value.to_string(),
            next: None,
        }));
        self.length += 1;
    }

    pub fn pop_front(&mut self) -> Option<String> {
        let node = self.head.take()?;
        self.head = node.next;
        self.length -= 1;
        Some(node.value)
    }

    pub fn pop_back(&mut self) -> Option<String> {
        let value = Self::pop_back_rec(&mut self.head)?;
        self.length -= 1;
        Some(value)
    }

    fn pop_back_rec(link: &mut Option<Box<FNode>>) -> Option<String> {
        let has_next = link.as_ref()?.next.is_some();
        if has_next {
            Self::pop_back_rec(&mut link.as_mut().expect("non-empty checked").next)
        } else {
            link.take().map(|node| node.value)
        }
    }

    /// Удаляет первое вхождение значения. Вернёт true, если было удалено.
    pub fn remove_by_value(&mut self, value: &str) -> bool {
        let chain = self.head.take();
        let (chain, removed) = Self::remove_from_chain(chain, value);
        self.head = chain;
        if removed {
            self.length -= 1;
        }
        removed
    }

    fn remove_from_chain(chain: Option<Box<FNode>>, value: &str) -> (Option<Box<FNode>>, bool) {
        match chain {
            None => (None, false),
            Some(mut node) => {
                if node.value == value {
                    (node.next.take(), true)
                } else {
                    let (rest, removed) = Self::remove_from_chain(node.next.take(), value);
                    node.next = rest;
                    (Some(node), removed)
                }
            }
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Вставляет значение сразу после первого вхождения якоря.
    pub fn insert_after(&mut self, anchor: &str, value: &str) -> bool {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.value == anchor {
                let next = node.next.take();
                node.next = Some(Box::new(FNode {
                    value: value.to_string(),
                    next,
                }));
                self.length += 1;
                return true;
            }
            cur = node.next.as_deref_mut();
        }
        false
    }

    /// Вставляет значение перед первым вхождением якоря.
    pub fn insert_before(&mut self, anchor: &str, value: &str) -> bool {
        if Self::insert_before_rec(&mut self.head, anchor, value) {
            self.length += 1;
            return true;
        }
        false
    }

    fn insert_before_rec(link: &mut Option<Box<FNode>>, anchor: &str, value: &str) -> bool {
        let is_anchor = match link.as_deref() {
            Some(node) => node.value == anchor,
            None => return false,
        };
        if is_anchor {
            let rest = link.take();
            *link = Some(Box::new(FNode {
                value: value.to_string(),
                next: rest,
            }));
            true
        } else {
            Self::insert_before_rec(
                &mut link.as_mut().expect("non-empty checked").next,
                anchor,
                value,
            )
        }
    }

    /// Удаляет узел, следующий за якорем.
    pub fn remove_after(&mut self, anchor: &str) -> bool {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.value == anchor {
                return match node.next.take() {
                    Some(mut removed) => {
                        node.next = removed.next.take();
                        self.length -= 1;
                        true
                    }
                    None => false,
                };
            }
            cur = node.next.as_deref_mut();
        }
        false
    }

    /// Удаляет узел, стоящий непосредственно перед якорем.
    pub fn remove_before(&mut self, anchor: &str) -> bool {
        if Self::remove_before_rec(&mut self.head, anchor) {
            self.length -= 1;
            return true;
        }
        false
    }

    fn remove_before_rec(link: &mut Option<Box<FNode>>, anchor: &str) -> bool {
        let next_is_anchor = match link.as_deref() {
            Some(node) => match node.next.as_deref() {
                Some(next) => next.value == anchor,
                None => return false,
            },
            None => return false,
        };
        if next_is_anchor {
            let mut removed = link.take().expect("non-empty checked");
            *link = removed.next.take();
            true
        } else {
            Self::remove_before_rec(&mut link.as_mut().expect("non-empty checked").next, anchor)
        }
    }

    pub fn iter(&self) -> ForwardListIter<'_> {
        ForwardListIter {
            current: self.head.as_deref(),
        }
    }

    // ---------- сериализация ----------

    /// Первая строка — число элементов, далее по значению на строку
    /// от головы к хвосту.
    pub fn serialize_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.length.to_string());
        out.push('\n');
        for value in self.iter() {
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

        let mut values = Vec::with_capacity(declared.min(1024));
        for _ in 0..declared {
            let line = lines
                .next()
                .ok_or_else(|| StoreError::MalformedStream("not enough lines".into()))?;
            values.push(line.to_string());
        }

        // восстанавливаем порядок с хвоста, чтобы push_front был O(1)
        for value in values.into_iter().rev() {
            self.push_front(&value);
        }
        Ok(())
    }

    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        w.write_u64::<BigEndian>(self.length as u64)?;
        for value in self.iter() {
            wire::write_string(w, value)?;
        }
        Ok(())
    }

    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        self.clear();
        let count = wire::read_u64(r, "length")?;
        let mut values = Vec::new();
        for _ in 0..count {
            values.push(wire::read_string(r, "item")?);
        }
        for value in values.into_iter().rev() {
            self.push_front(&value);
        }
        Ok(())
    }
}

impl Drop for ForwardList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a> Iterator for ForwardListIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a> IntoIterator for &'a ForwardList {
    type Item = &'a str;
    type IntoIter = ForwardListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ForwardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForwardList(size={}):", self.length)?;
        for value in self.iter() {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

impl Serialize for ForwardList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values: Vec<&str> = self.iter().collect();
        values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ForwardList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<String>::deserialize(deserializer)?;
        let mut list = ForwardList::new();
        for value in values.into_iter().rev() {
            list.push_front(&value);
        }
        Ok(list)
    }
}
