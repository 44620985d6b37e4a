//! Теги видов коллекций в дампе.
//!
//! Номера и имена совпадают с историческим форматом и не меняются.

use crate::engine::store::CollectionKind;

pub const TAG_ARRAY: u8 = 0;
pub const TAG_FLIST: u8 = 1;
pub const TAG_LLIST: u8 = 2;
pub const TAG_STACK: u8 = 3;
pub const TAG_QUEUE: u8 = 4;
pub const TAG_TREE: u8 = 5;
pub const TAG_CHAIN: u8 = 6;
pub const TAG_OPEN: u8 = 7;

pub fn tag_of(kind: CollectionKind) -> u8 {
    match kind {
        CollectionKind::Array => TAG_ARRAY,
        CollectionKind::FList => TAG_FLIST,
        CollectionKind::LList => TAG_LLIST,
        CollectionKind::Stack => TAG_STACK,
        CollectionKind::Queue => TAG_QUEUE,
        CollectionKind::Tree => TAG_TREE,
        CollectionKind::Chain => TAG_CHAIN,
        CollectionKind::Open => TAG_OPEN,
    }
}

pub fn kind_of(tag: u8) -> Option<CollectionKind> {
    match tag {
        TAG_ARRAY => Some(CollectionKind::Array),
        TAG_FLIST => Some(CollectionKind::FList),
        TAG_LLIST => Some(CollectionKind::LList),
        TAG_STACK => Some(CollectionKind::Stack),
        TAG_QUEUE => Some(CollectionKind::Queue),
        TAG_TREE => Some(CollectionKind::Tree),
        TAG_CHAIN => Some(CollectionKind::Chain),
        TAG_OPEN => Some(CollectionKind::Open),
        _ => None,
    }
}

/// Имя вида в заголовке текстового дампа.
pub fn name_of(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Array => "ARRAY",
        CollectionKind::FList => "FLIST",
        CollectionKind::LList => "LLIST",
        CollectionKind::Stack => "STACK",
        CollectionKind::Queue => "QUEUE",
        CollectionKind::Tree => "AVL",
        CollectionKind::Chain => "HCHAIN",
        CollectionKind::Open => "HOPEN",
    }
}

pub fn kind_by_name(name: &str) -> Option<CollectionKind> {
    match name {
        "ARRAY" => Some(CollectionKind::Array),
        "FLIST" => Some(CollectionKind::FList),
        "LLIST" => Some(CollectionKind::LList),
        "STACK" => Some(CollectionKind::Stack),
        "QUEUE" => Some(CollectionKind::Queue),
        "AVL" => Some(CollectionKind::Tree),
        "HCHAIN" => Some(CollectionKind::Chain),
        "HOPEN" => Some(CollectionKind::Open),
        _ => None,
    }
}
