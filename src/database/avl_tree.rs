//! Сбалансированное АВЛ-дерево строк.
//!
//! Упорядоченное множество уникальных строк с O(log n) вставкой,
//! удалением и поиском. Баланс поддерживается поворотами: после каждой
//! мутации перекос любого узла не превышает единицы, поэтому глубина
//! рекурсии логарифмическая и безопасная.

use std::{
    cmp::Ordering,
    fmt,
    io::{Read, Write},
};

use byteorder::{ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire;
use crate::error::{StoreError, StoreResult};

/// Узел дерева. Высота отсутствующего поддерева равна 0, листа — 1.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    value: String,
    height: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(value: String) -> Box<Self> {
        Box::new(Node {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }
}

/// АВЛ-дерево: строгий BST-порядок по байтовому сравнению строк,
/// без дубликатов. `size` — кешированное число живых узлов.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvlTree {
    root: Option<Box<Node>>,
    size: usize,
}

/// Итератор по значениям в порядке возрастания.
pub struct InOrderIter<'a> {
    stack: Vec<&'a Node>,
}

impl AvlTree {
    /// Новое пустое дерево.
    pub fn new() -> Self {
        AvlTree {
            root: None,
            size: 0,
        }
    }

    /// Число значений в дереве.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree has no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Высота корня (0 для пустого дерева).
    pub fn height(&self) -> i32 {
        Self::height_of(&self.root)
    }

    /// Удаляет все узлы.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Проверяет наличие значения за O(log n).
    pub fn contains(&self, value: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.value.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Вставляет значение. Повторная вставка — no-op, размер не меняется.
    pub fn insert(&mut self, value: &str) {
        let mut inserted = false;
        self.root = Some(Self::insert_node(self.root.take(), value, &mut inserted));
        if inserted {
            self.size += 1;
        }
    }

    /// Удаляет значение. Отсутствующее значение — no-op.
    pub fn remove(&mut self, value: &str) {
        let mut removed = false;
        self.root = Self::remove_node(self.root.take(), value, &mut removed);
        if removed && self.size > 0 {
            self.size -= 1;
        }
    }

    /// Итератор по значениям в порядке возрастания.
    pub fn iter(&self) -> InOrderIter<'_> {
        let mut iter = InOrderIter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    // ---------- высота / баланс ----------

    fn height_of(node: &Option<Box<Node>>) -> i32 {
        node.as_deref().map_or(0, |n| n.height)
    }

    fn update_height(node: &mut Node) {
        node.height = 1 + Self::height_of(&node.left).max(Self::height_of(&node.right));
    }

    fn balance_of(node: &Node) -> i32 {
        Self::height_of(&node.left) - Self::height_of(&node.right)
    }

    /// Баланс-фактор поддерева; для отсутствующего узла равен 0.
    fn balance_in(node: &Option<Box<Node>>) -> i32 {
        node.as_deref().map_or(0, Self::balance_of)
    }

    // ---------- повороты ----------

    fn rotate_right(mut parent: Box<Node>) -> Box<Node> {
        let mut pivot = parent
            .left
            .take()
            .expect("rotate_right requires a left child");
        parent.left = pivot.right.take();
        Self::update_height(&mut parent);
        pivot.right = Some(parent);
        Self::update_height(&mut pivot);
        pivot
    }

    fn rotate_left(mut parent: Box<Node>) -> Box<Node> {
        let mut pivot = parent
            .right
            .take()
            .expect("rotate_left requires a right child");
        parent.right = pivot.left.take();
        Self::update_height(&mut parent);
        pivot.left = Some(parent);
        Self::update_height(&mut pivot);
        pivot
    }

    // ---------- вставка ----------

    fn insert_node(node: Option<Box<Node>>, value: &str, inserted: &mut bool) -> Box<Node> {
        let mut node = match node {
            None => {
                *inserted = true;
                return Node::new(value.to_string());
            }
            Some(n) => n,
        };

        match value.cmp(node.value.as_str()) {
            Ordering::Less => {
                node.left = Some(Self::insert_node(node.left.take(), value, inserted));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_node(node.right.take(), value, inserted));
            }
            // дубликат — дерево не меняется
            Ordering::Equal => return node,
        }

        Self::update_height(&mut node);
        let balance = Self::balance_of(&node);

        if balance > 1 {
            let left_value = node
                .left
                .as_deref()
                .map(|n| n.value.as_str())
                .expect("heavy side has a child");
            if value < left_value {
                // LL
                return Self::rotate_right(node);
            }
            // LR
            let left = node.left.take().expect("heavy side has a child");
            node.left = Some(Self::rotate_left(left));
            return Self::rotate_right(node);
        }

        if balance < -1 {
            let right_value = node
                .right
                .as_deref()
                .map(|n| n.value.as_str())
                .expect("heavy side has a child");
            if value > right_value {
                // RR
                return Self::rotate_left(node);
            }
            // RL
            let right = node.right.take().expect("heavy side has a child");
            node.right = Some(Self::rotate_right(right));
            return Self::rotate_left(node);
        }

        node
    }

    // ---------- удаление ----------

    fn remove_node(node: Option<Box<Node>>, value: &str, removed: &mut bool) -> Option<Box<Node>> {
        let mut node = node?;

        match value.cmp(node.value.as_str()) {
            Ordering::Less => {
                node.left = Self::remove_node(node.left.take(), value, removed);
            }
            Ordering::Greater => {
                node.right = Self::remove_node(node.right.take(), value, removed);
            }
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (None, None) => return None,
                    // один ребёнок просто поднимается наверх
                    (Some(child), None) | (None, Some(child)) => node = child,
                    (left, Some(right)) => {
                        // два ребёнка: узел получает значение inorder-преемника
                        // (минимума правого поддерева), а сам преемник
                        // удаляется из правого поддерева
                        node.left = left;
                        let successor = Self::min_value(&right).to_owned();
                        node.right = Self::remove_node(Some(right), &successor, removed);
                        node.value = successor;
                    }
                }
            }
        }

        Self::update_height(&mut node);
        let balance = Self::balance_of(&node);

        // при удалении «нового значения» нет, поэтому случай поворота
        // выбирается по знаку баланс-фактора ребёнка
        if balance > 1 {
            if Self::balance_in(&node.left) >= 0 {
                return Some(Self::rotate_right(node));
            }
            let left = node.left.take().expect("heavy side has a child");
            node.left = Some(Self::rotate_left(left));
            return Some(Self::rotate_right(node));
        }

        if balance < -1 {
            if Self::balance_in(&node.right) <= 0 {
                return Some(Self::rotate_left(node));
            }
            let right = node.right.take().expect("heavy side has a child");
            node.right = Some(Self::rotate_right(right));
            return Some(Self::rotate_left(node));
        }

        Some(node)
    }

    fn min_value(mut node: &Node) -> &str {
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        &node.value
    }

    // ---------- текстовая сериализация ----------

    /// Префиксный обход: значение узла на своей строке, `#` для
    /// отсутствующего поддерева.
    pub fn serialize_text(&self) -> String {
        let mut out = String::new();
        Self::serialize_rec(&self.root, &mut out);
        out
    }

    fn serialize_rec(node: &Option<Box<Node>>, out: &mut String) {
        match node.as_deref() {
            None => out.push_str("#\n"),
            Some(n) => {
                out.push_str(&n.value);
                out.push('\n');
                Self::serialize_rec(&n.left, out);
                Self::serialize_rec(&n.right, out);
            }
        }
    }

    /// Восстанавливает дерево из префиксной записи. Оборвавшийся поток
    /// читается как отсутствующие поддеревья; `size` пересчитывается
    /// полным обходом и никогда не берётся из потока.
    pub fn deserialize_text(&mut self, data: &str) {
        let mut lines = data.lines();
        self.root = Self::deserialize_rec(&mut lines);
        self.size = Self::count_nodes(&self.root);
    }

    fn deserialize_rec<'a, I>(lines: &mut I) -> Option<Box<Node>>
    where
        I: Iterator<Item = &'a str>,
    {
        let line = lines.next()?;
        if line == "#" {
            return None;
        }
        let mut node = Node::new(line.to_string());
        node.left = Self::deserialize_rec(lines);
        node.right = Self::deserialize_rec(lines);
        node.height = 1 + Self::height_of(&node.left).max(Self::height_of(&node.right));
        Some(node)
    }

    fn count_nodes(root: &Option<Box<Node>>) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = Vec::new();
        if let Some(n) = root.as_deref() {
            stack.push(n);
        }
        while let Some(node) = stack.pop() {
            count += 1;
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
        }
        count
    }

    // ---------- бинарная сериализация ----------

    /// Рекурсивный префиксный формат: байт присутствия (0/1), u64-длина
    /// значения, сырые байты, затем левое и правое поддеревья.
    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        Self::write_binary_rec(&self.root, w)
    }

    fn write_binary_rec<W: Write>(node: &Option<Box<Node>>, w: &mut W) -> StoreResult<()> {
        match node.as_deref() {
            None => {
                w.write_u8(0)?;
                Ok(())
            }
            Some(n) => {
                w.write_u8(1)?;
                wire::write_string(w, &n.value)?;
                Self::write_binary_rec(&n.left, w)?;
                Self::write_binary_rec(&n.right, w)
            }
        }
    }

    /// Восстанавливает дерево из бинарного потока. При ошибке дерево
    /// остаётся пустым.
    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        self.clear();
        let root = Self::read_binary_rec(r)?;
        self.size = Self::count_nodes(&root);
        self.root = root;
        Ok(())
    }

    fn read_binary_rec<R: Read>(r: &mut R) -> StoreResult<Option<Box<Node>>> {
        let flag = r
            .read_u8()
            .map_err(|_| StoreError::MalformedStream("cannot read node flag".into()))?;
        if flag == 0 {
            return Ok(None);
        }
        let mut node = Node::new(wire::read_string(r, "node value")?);
        node.left = Self::read_binary_rec(r)?;
        node.right = Self::read_binary_rec(r)?;
        node.height = 1 + Self::height_of(&node.left).max(Self::height_of(&node.right));
        Ok(Some(node))
    }
}

impl<'a> InOrderIter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a str;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for AvlTree {
    /// Дерево «лежит на боку»: правое поддерево выше, отступ — глубина.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_rec(node: &Option<Box<Node>>, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if let Some(n) = node.as_deref() {
                fmt_rec(&n.right, depth + 1, f)?;
                writeln!(f, "{}{}", "  ".repeat(depth), n.value)?;
                fmt_rec(&n.left, depth + 1, f)?;
            }
            Ok(())
        }
        fmt_rec(&self.root, 0, f)
    }
}

impl Serialize for AvlTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values: Vec<&str> = self.iter().collect();
        values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AvlTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<String>::deserialize(deserializer)?;
        let mut tree = AvlTree::new();
        for value in &values {
            tree.insert(value);
        }
        Ok(tree)
    }
}
