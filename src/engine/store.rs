//! Хранилище именованных коллекций.
//!
//! Плоский список записей (имя, коллекция) с линейным поиском по имени.
//! Команда с новым именем создаёт коллекцию своего вида; обращение к
//! существующему имени с другим видом — ошибка типа.

use std::io::{Read, Write};

use tracing::debug;

use crate::{
    database::{Array, AvlTree, ChainMap, ForwardList, List, OpenMap, Queue, Stack},
    error::{StoreError, StoreResult},
};

/// Максимум именованных коллекций в одном хранилище.
pub const MAX_COLLECTIONS: usize = 64;

/// Вид коллекции — он же тег записи в дампе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Array,
    FList,
    LList,
    Stack,
    Queue,
    Tree,
    Chain,
    Open,
}

/// Именованная коллекция любого поддерживаемого вида.
#[derive(Debug, Clone)]
pub enum Collection {
    Array(Array),
    FList(ForwardList),
    LList(List),
    Stack(Stack),
    Queue(Queue),
    Tree(AvlTree),
    Chain(ChainMap),
    Open(OpenMap),
}

impl Collection {
    pub fn new_of(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Array => Collection::Array(Array::new()),
            CollectionKind::FList => Collection::FList(ForwardList::new()),
            CollectionKind::LList => Collection::LList(List::new()),
            CollectionKind::Stack => Collection::Stack(Stack::new()),
            CollectionKind::Queue => Collection::Queue(Queue::new()),
            CollectionKind::Tree => Collection::Tree(AvlTree::new()),
            CollectionKind::Chain => Collection::Chain(ChainMap::new()),
            CollectionKind::Open => Collection::Open(OpenMap::new()),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            Collection::Array(_) => CollectionKind::Array,
            Collection::FList(_) => CollectionKind::FList,
            Collection::LList(_) => CollectionKind::LList,
            Collection::Stack(_) => CollectionKind::Stack,
            Collection::Queue(_) => CollectionKind::Queue,
            Collection::Tree(_) => CollectionKind::Tree,
            Collection::Chain(_) => CollectionKind::Chain,
            Collection::Open(_) => CollectionKind::Open,
        }
    }

    /// Человекочитаемое представление для PRINT-команд.
    pub fn render(&self) -> String {
        match self {
            Collection::Array(c) => c.to_string(),
            Collection::FList(c) => c.to_string(),
            Collection::LList(c) => c.to_string(),
            Collection::Stack(c) => c.to_string(),
            Collection::Queue(c) => c.to_string(),
            Collection::Tree(c) => c.to_string(),
            Collection::Chain(c) => c.to_string(),
            Collection::Open(c) => c.to_string(),
        }
    }

    /// Каноническая текстовая сериализация вложенной коллекции.
    pub fn serialize_text(&self) -> String {
        match self {
            Collection::Array(c) => c.serialize_text(),
            Collection::FList(c) => c.serialize_text(),
            Collection::LList(c) => c.serialize_text(),
            Collection::Stack(c) => c.serialize_text(),
            Collection::Queue(c) => c.serialize_text(),
            Collection::Tree(c) => c.serialize_text(),
            Collection::Chain(c) => c.serialize_text(),
            Collection::Open(c) => c.serialize_text(),
        }
    }

    pub fn deserialize_text(&mut self, data: &str) -> StoreResult<()> {
        match self {
            Collection::Array(c) => c.deserialize_text(data),
            Collection::FList(c) => c.deserialize_text(data),
            Collection::LList(c) => c.deserialize_text(data),
            Collection::Stack(c) => c.deserialize_text(data),
            Collection::Queue(c) => c.deserialize_text(data),
            Collection::Tree(c) => {
                c.deserialize_text(data);
                Ok(())
            }
            Collection::Chain(c) => c.deserialize_text(data),
            Collection::Open(c) => c.deserialize_text(data),
        }
    }

    pub fn write_binary<W: Write>(&self, w: &mut W) -> StoreResult<()> {
        match self {
            Collection::Array(c) => c.write_binary(w),
            Collection::FList(c) => c.write_binary(w),
            Collection::LList(c) => c.write_binary(w),
            Collection::Stack(c) => c.write_binary(w),
            Collection::Queue(c) => c.write_binary(w),
            Collection::Tree(c) => c.write_binary(w),
            Collection::Chain(c) => c.write_binary(w),
            Collection::Open(c) => c.write_binary(w),
        }
    }

    pub fn read_binary<R: Read>(&mut self, r: &mut R) -> StoreResult<()> {
        match self {
            Collection::Array(c) => c.read_binary(r),
            Collection::FList(c) => c.read_binary(r),
            Collection::LList(c) => c.read_binary(r),
            Collection::Stack(c) => c.read_binary(r),
            Collection::Queue(c) => c.read_binary(r),
            Collection::Tree(c) => c.read_binary(r),
            Collection::Chain(c) => c.read_binary(r),
            Collection::Open(c) => c.read_binary(r),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    records: Vec<(String, Collection)>,
}

macro_rules! typed_access {
    ($get:ident, $get_or_create:ident, $variant:ident, $ty:ty, $kind:expr) => {
        pub fn $get(&mut self, name: &str) -> StoreResult<&mut $ty> {
            match self.get_mut(name) {
                None => Err(StoreError::UnknownCollection(name.to_string())),
                Some(Collection::$variant(inner)) => Ok(inner),
                Some(_) => Err(StoreError::WrongType(name.to_string())),
            }
        }

        pub fn $get_or_create(&mut self, name: &str) -> StoreResult<&mut $ty> {
            match self.get_or_create(name, $kind)? {
                Collection::$variant(inner) => Ok(inner),
                _ => Err(StoreError::WrongType(name.to_string())),
            }
        }
    };
}

impl Store {
    pub fn new() -> Self {
        Store {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.records
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.records
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Добавляет готовую коллекцию (используется загрузчиком дампа).
    /// Существующее имя перезаписывается.
    pub fn insert(&mut self, name: &str, collection: Collection) -> StoreResult<()> {
        if let Some(existing) = self.get_mut(name) {
            *existing = collection;
            return Ok(());
        }
        if self.records.len() >= MAX_COLLECTIONS {
            return Err(StoreError::StoreFull(MAX_COLLECTIONS));
        }
        self.records.push((name.to_string(), collection));
        Ok(())
    }

    /// Коллекция по имени; отсутствующая создаётся пустой заданного вида.
    pub fn get_or_create(
        &mut self,
        name: &str,
        kind: CollectionKind,
    ) -> StoreResult<&mut Collection> {
        match self.records.iter().position(|(n, _)| n == name) {
            Some(index) => {
                let collection = &mut self.records[index].1;
                if collection.kind() != kind {
                    return Err(StoreError::WrongType(name.to_string()));
                }
                Ok(collection)
            }
            None => {
                if self.records.len() >= MAX_COLLECTIONS {
                    return Err(StoreError::StoreFull(MAX_COLLECTIONS));
                }
                debug!(name, ?kind, "collection created");
                self.records.push((name.to_string(), Collection::new_of(kind)));
                Ok(&mut self.records.last_mut().expect("just pushed").1)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection)> {
        self.records.iter().map(|(n, c)| (n.as_str(), c))
    }

    typed_access!(array, array_or_create, Array, Array, CollectionKind::Array);
    typed_access!(flist, flist_or_create, FList, ForwardList, CollectionKind::FList);
    typed_access!(llist, llist_or_create, LList, List, CollectionKind::LList);
    typed_access!(stack, stack_or_create, Stack, Stack, CollectionKind::Stack);
    typed_access!(queue, queue_or_create, Queue, Queue, CollectionKind::Queue);
    typed_access!(tree, tree_or_create, Tree, AvlTree, CollectionKind::Tree);
    typed_access!(chain, chain_or_create, Chain, ChainMap, CollectionKind::Chain);
    typed_access!(open, open_or_create, Open, OpenMap, CollectionKind::Open);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_on_first_access() {
        let mut store = Store::new();
        store.tree_or_create("names").unwrap().insert("b");
        store.tree_or_create("names").unwrap().insert("a");

        assert_eq!(store.len(), 1);
        assert_eq!(store.tree("names").unwrap().len(), 2);
    }

    /// Обращение к имени с другим видом коллекции — ошибка типа.
    #[test]
    fn kind_mismatch_is_error() {
        let mut store = Store::new();
        store.tree_or_create("thing").unwrap();

        assert!(matches!(
            store.chain_or_create("thing"),
            Err(StoreError::WrongType(_))
        ));
        assert!(matches!(store.chain("thing"), Err(StoreError::WrongType(_))));
    }

    #[test]
    fn unknown_name_is_error() {
        let mut store = Store::new();
        assert!(matches!(
            store.stack("ghost"),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    #[test]
    fn capacity_limit() {
        let mut store = Store::new();
        for i in 0..MAX_COLLECTIONS {
            store.queue_or_create(&format!("q{i}")).unwrap();
        }
        assert!(matches!(
            store.queue_or_create("overflow"),
            Err(StoreError::StoreFull(_))
        ));
    }

    #[test]
    fn clear_releases_all_records() {
        let mut store = Store::new();
        store.tree_or_create("t").unwrap();
        store.stack_or_create("s").unwrap();

        store.clear();
        assert!(store.is_empty());
        assert!(store.get("t").is_none());
    }

    #[test]
    fn insert_replaces_existing() {
        let mut store = Store::new();
        store.array_or_create("a").unwrap().push_back("old");

        store
            .insert("a", Collection::Array(Array::new()))
            .unwrap();
        assert!(store.array("a").unwrap().is_empty());
    }
}
