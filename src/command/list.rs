//! Команды двусвязного списка: LPUSH, LDEL, LPUSH_AFTER, LPUSH_BEFORE,
//! LDEL_AFTER, LDEL_BEFORE, LPRINT.

use super::{
    execute::{CommandExecute, Reply},
    Place,
};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct ListPushCommand {
    pub name: String,
    pub place: Place,
    pub value: String,
}

impl CommandExecute for ListPushCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.llist_or_create(&self.name)?;
        match self.place {
            Place::Head => list.push_front(&self.value),
            Place::Tail => list.push_back(&self.value),
        }
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

/// Цель LDEL: голова, хвост или первое вхождение значения.
#[derive(Debug)]
pub enum ListDelTarget {
    Head,
    Tail,
    Value(String),
}

#[derive(Debug)]
pub struct ListDelCommand {
    pub name: String,
    pub target: ListDelTarget,
}

impl CommandExecute for ListDelCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.llist(&self.name)?;
        match &self.target {
            ListDelTarget::Head => {
                list.pop_front();
            }
            ListDelTarget::Tail => {
                list.pop_back();
            }
            ListDelTarget::Value(value) => {
                list.remove_by_value(value);
            }
        }
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ListInsertAfterCommand {
    pub name: String,
    pub anchor: String,
    pub value: String,
}

impl CommandExecute for ListInsertAfterCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.llist(&self.name)?.insert_after(&self.anchor, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ListInsertBeforeCommand {
    pub name: String,
    pub anchor: String,
    pub value: String,
}

impl CommandExecute for ListInsertBeforeCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.llist(&self.name)?.insert_before(&self.anchor, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ListRemoveAfterCommand {
    pub name: String,
    pub anchor: String,
}

impl CommandExecute for ListRemoveAfterCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.llist(&self.name)?.remove_after(&self.anchor);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ListRemoveBeforeCommand {
    pub name: String,
    pub anchor: String,
}

impl CommandExecute for ListRemoveBeforeCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.llist(&self.name)?.remove_before(&self.anchor);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ListPrintCommand {
    pub name: String,
}

impl CommandExecute for ListPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.llist(&self.name)?;
        Ok(Reply::Value(list.to_string()))
    }
}
