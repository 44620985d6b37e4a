//! Команды массива: MPUSH, MINSERT, MDEL, MSET, MGET, MPRINT.

use super::execute::{CommandExecute, Reply};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct ArrayPushCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for ArrayPushCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.array_or_create(&self.name)?.push_back(&self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ArrayInsertCommand {
    pub name: String,
    pub index: usize,
    pub value: String,
}

impl CommandExecute for ArrayInsertCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.array(&self.name)?.insert(self.index, &self.value)?;
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ArrayRemoveCommand {
    pub name: String,
    pub index: usize,
}

impl CommandExecute for ArrayRemoveCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.array(&self.name)?.remove_at(self.index)?;
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ArraySetCommand {
    pub name: String,
    pub index: usize,
    pub value: String,
}

impl CommandExecute for ArraySetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.array(&self.name)?.set(self.index, &self.value)?;
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ArrayGetCommand {
    pub name: String,
    pub index: usize,
}

impl CommandExecute for ArrayGetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.array(&self.name)?.get(self.index) {
            Some(value) => Ok(Reply::Value(value.to_string())),
            None => Ok(Reply::Missing),
        }
    }
}

#[derive(Debug)]
pub struct ArrayPrintCommand {
    pub name: String,
}

impl CommandExecute for ArrayPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let array = store.array(&self.name)?;
        Ok(Reply::Value(array.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn push_insert_get() {
        let mut store = Store::new();

        ArrayPushCommand {
            name: "a".into(),
            value: "x".into(),
        }
        .execute(&mut store)
        .unwrap();
        ArrayInsertCommand {
            name: "a".into(),
            index: 0,
            value: "start".into(),
        }
        .execute(&mut store)
        .unwrap();

        let get = ArrayGetCommand {
            name: "a".into(),
            index: 0,
        };
        assert_eq!(get.execute(&mut store).unwrap(), Reply::Value("start".into()));
    }

    #[test]
    fn out_of_range_get_is_missing_and_set_is_error() {
        let mut store = Store::new();
        ArrayPushCommand {
            name: "a".into(),
            value: "only".into(),
        }
        .execute(&mut store)
        .unwrap();

        let get = ArrayGetCommand {
            name: "a".into(),
            index: 5,
        };
        assert_eq!(get.execute(&mut store).unwrap(), Reply::Missing);

        let set = ArraySetCommand {
            name: "a".into(),
            index: 5,
            value: "x".into(),
        };
        assert!(matches!(
            set.execute(&mut store),
            Err(StoreError::IndexOutOfBounds)
        ));
    }
}
