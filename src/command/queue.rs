//! Команды очереди: QPUSH, QPOP, QPRINT.

use super::execute::{CommandExecute, Reply};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct QueuePushCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for QueuePushCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.queue_or_create(&self.name)?.push(&self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct QueuePopCommand {
    pub name: String,
}

impl CommandExecute for QueuePopCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.queue(&self.name)?.pop() {
            Some(value) => Ok(Reply::Value(value)),
            None => Ok(Reply::Missing),
        }
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct QueuePrintCommand {
    pub name: String,
}

impl CommandExecute for QueuePrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let queue = store.queue(&self.name)?;
        Ok(Reply::Value(queue.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_order() {
        let mut store = Store::new();

        for value in ["a", "b"] {
            QueuePushCommand {
                name: "q".into(),
                value: value.into(),
            }
            .execute(&mut store)
            .unwrap();
        }

        let pop = QueuePopCommand { name: "q".into() };
        assert_eq!(pop.execute(&mut store).unwrap(), Reply::Value("a".into()));
        assert_eq!(pop.execute(&mut store).unwrap(), Reply::Value("b".into()));
        assert_eq!(pop.execute(&mut store).unwrap(), Reply::Missing);
    }
}
