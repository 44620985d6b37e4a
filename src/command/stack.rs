//! Команды стека: SPUSH, SPOP, SPRINT.

use super::execute::{CommandExecute, Reply};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct StackPushCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for StackPushCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.stack_or_create(&self.name)?.push(&self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct StackPopCommand {
    pub name: String,
}

impl CommandExecute for StackPopCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.stack(&self.name)?.pop() {
            Some(value) => Ok(Reply::Value(value)),
            None => Ok(Reply::Missing),
        }
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct StackPrintCommand {
    pub name: String,
}

impl CommandExecute for StackPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let stack = store.stack(&self.name)?;
        Ok(Reply::Value(stack.to_string()))
    }
}
