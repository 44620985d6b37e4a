//! Команды АВЛ-дерева: TINSERT, TDEL, TCONTAINS, TPRINT.

use super::execute::{CommandExecute, Reply};
use crate::{engine::Store, error::StoreResult};

#[derive(Debug)]
pub struct TreeInsertCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for TreeInsertCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.tree_or_create(&self.name)?.insert(&self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct TreeRemoveCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for TreeRemoveCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.tree(&self.name)?.remove(&self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct TreeContainsCommand {
    pub name: String,
    pub value: String,
}

impl CommandExecute for TreeContainsCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let found = store.tree(&self.name)?.contains(&self.value);
        Ok(Reply::Value(found.to_string()))
    }
}

#[derive(Debug)]
pub struct TreePrintCommand {
    pub name: String,
}

impl CommandExecute for TreePrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let tree = store.tree(&self.name)?;
        Ok(Reply::Value(tree.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_creates_and_contains_answers() {
        let mut store = Store::new();

        let insert = TreeInsertCommand {
            name: "t".into(),
            value: "apple".into(),
        };
        assert_eq!(insert.execute(&mut store).unwrap(), Reply::Ok);
        assert!(insert.mutates());

        let contains = TreeContainsCommand {
            name: "t".into(),
            value: "apple".into(),
        };
        assert_eq!(
            contains.execute(&mut store).unwrap(),
            Reply::Value("true".into())
        );

        let absent = TreeContainsCommand {
            name: "t".into(),
            value: "pear".into(),
        };
        assert_eq!(
            absent.execute(&mut store).unwrap(),
            Reply::Value("false".into())
        );
    }

    #[test]
    fn remove_on_unknown_collection_is_error() {
        let mut store = Store::new();
        let remove = TreeRemoveCommand {
            name: "ghost".into(),
            value: "x".into(),
        };
        assert!(remove.execute(&mut store).is_err());
    }
}
