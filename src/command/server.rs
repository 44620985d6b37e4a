//! Служебные команды: HELP и обобщённый PRINT.

use super::execute::{CommandExecute, Reply};
use crate::{
    engine::Store,
    error::{StoreError, StoreResult},
};

const HELP_TEXT: &str = "\
ARRAY (M): MPUSH name val | MINSERT name pos val | MDEL name pos | MSET name pos val | MGET name pos | MPRINT name
FORWARD LIST (F): FPUSH name HEAD/TAIL val | FDEL name HEAD/VAL val |
                  FPUSH_AFTER name after val | FPUSH_BEFORE name before val |
                  FDEL_AFTER name after | FDEL_BEFORE name before | FDEL_TAIL name | FPRINT name
LINKED LIST (L): LPUSH name HEAD/TAIL val | LDEL name HEAD/TAIL/VAL val |
                 LPUSH_AFTER name after val | LPUSH_BEFORE name before val |
                 LDEL_AFTER name after | LDEL_BEFORE name before | LPRINT name
STACK (S): SPUSH name val | SPOP name | SPRINT name
QUEUE (Q): QPUSH name val | QPOP name | QPRINT name
AVL TREE (T): TINSERT name val | TDEL name val | TCONTAINS name val | TPRINT name
HASH chained: HSET name key value... | HGET name key | HDEL name key | HPRINT name
HASH open addressing: H2SET name key value... | H2GET name key | H2DEL name key | H2PRINT name
PRINT name | HELP | EXIT/QUIT";

#[derive(Debug)]
pub struct HelpCommand;

impl CommandExecute for HelpCommand {
    fn execute(&self, _store: &mut Store) -> StoreResult<Reply> {
        Ok(Reply::Value(HELP_TEXT.to_string()))
    }
}

/// Печатает коллекцию любого вида по имени.
#[derive(Debug)]
pub struct PrintCommand {
    pub name: String,
}

impl CommandExecute for PrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.get(&self.name) {
            Some(collection) => Ok(Reply::Value(collection.render())),
            None => Err(StoreError::UnknownCollection(self.name.clone())),
        }
    }
}
