//! Команды односвязного списка: FPUSH, FDEL, FPUSH_AFTER, FPUSH_BEFORE,
//! FDEL_AFTER, FDEL_BEFORE, FDEL_TAIL, FPRINT.

use super::{
    execute::{CommandExecute, Reply},
    Place,
};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct FListPushCommand {
    pub name: String,
    pub place: Place,
    pub value: String,
}

impl CommandExecute for FListPushCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.flist_or_create(&self.name)?;
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

/// Цель FDEL: голова или первое вхождение значения.
#[derive(Debug)]
pub enum FListDelTarget {
    Head,
    Value(String),
}

#[derive(Debug)]
pub struct FListDelCommand {
    pub name: String,
    pub target: FListDelTarget,
}

impl CommandExecute for FListDelCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.flist(&self.name)?;
        match &self.target {
            FListDelTarget::Head => {
                list.pop_front();
            }
            FListDelTarget::Value(value) => {
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
pub struct FListInsertAfterCommand {
    pub name: String,
    pub anchor: String,
    pub value: String,
}

impl CommandExecute for FListInsertAfterCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.flist(&self.name)?.insert_after(&self.anchor, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct FListInsertBeforeCommand {
    pub name: String,
    pub anchor: String,
    pub value: String,
}

impl CommandExecute for FListInsertBeforeCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.flist(&self.name)?.insert_before(&self.anchor, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct FListRemoveAfterCommand {
    pub name: String,
    pub anchor: String,
}

impl CommandExecute for FListRemoveAfterCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.flist(&self.name)?.remove_after(&self.anchor);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct FListRemoveBeforeCommand {
    pub name: String,
    pub anchor: String,
}

impl CommandExecute for FListRemoveBeforeCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.flist(&self.name)?.remove_before(&self.anchor);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct FListPopBackCommand {
    pub name: String,
}

impl CommandExecute for FListPopBackCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.flist(&self.name)?.pop_back();
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct FListPrintCommand {
    pub name: String,
}

impl CommandExecute for FListPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let list = store.flist(&self.name)?;
        Ok(Reply::Value(list.to_string()))
    }
}
