//! Команды хеш-таблиц: HSET/HGET/HDEL/HPRINT для цепной таблицы и
//! H2SET/H2GET/H2DEL/H2PRINT для таблицы с открытой адресацией.

use super::execute::{CommandExecute, Reply};
use crate::{engine::Store, error::StoreResult};

// ---------- цепная таблица ----------

#[derive(Debug)]
pub struct ChainSetCommand {
    pub name: String,
    pub key: String,
    pub value: String,
}

impl CommandExecute for ChainSetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.chain_or_create(&self.name)?.insert(&self.key, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ChainGetCommand {
    pub name: String,
    pub key: String,
}

impl CommandExecute for ChainGetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.chain(&self.name)?.find(&self.key) {
            Some(value) => Ok(Reply::Value(value.to_string())),
            None => Ok(Reply::Missing),
        }
    }
}

#[derive(Debug)]
pub struct ChainDelCommand {
    pub name: String,
    pub key: String,
}

impl CommandExecute for ChainDelCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.chain(&self.name)?.erase(&self.key);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ChainPrintCommand {
    pub name: String,
}

impl CommandExecute for ChainPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let map = store.chain(&self.name)?;
        Ok(Reply::Value(map.to_string()))
    }
}

// ---------- открытая адресация ----------

#[derive(Debug)]
pub struct OpenSetCommand {
    pub name: String,
    pub key: String,
    pub value: String,
}

impl CommandExecute for OpenSetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.open_or_create(&self.name)?.insert(&self.key, &self.value);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct OpenGetCommand {
    pub name: String,
    pub key: String,
}

impl CommandExecute for OpenGetCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        match store.open(&self.name)?.find(&self.key) {
            Some(value) => Ok(Reply::Value(value.to_string())),
            None => Ok(Reply::Missing),
        }
    }
}

#[derive(Debug)]
pub struct OpenDelCommand {
    pub name: String,
    pub key: String,
}

impl CommandExecute for OpenDelCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        store.open(&self.name)?.erase(&self.key);
        Ok(Reply::Ok)
    }

    fn mutates(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct OpenPrintCommand {
    pub name: String,
}

impl CommandExecute for OpenPrintCommand {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply> {
        let map = store.open(&self.name)?;
        Ok(Reply::Value(map.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_del_chain() {
        let mut store = Store::new();

        ChainSetCommand {
            name: "h".into(),
            key: "k".into(),
            value: "v".into(),
        }
        .execute(&mut store)
        .unwrap();

        let get = ChainGetCommand {
            name: "h".into(),
            key: "k".into(),
        };
        assert_eq!(get.execute(&mut store).unwrap(), Reply::Value("v".into()));

        ChainDelCommand {
            name: "h".into(),
            key: "k".into(),
        }
        .execute(&mut store)
        .unwrap();
        assert_eq!(get.execute(&mut store).unwrap(), Reply::Missing);
    }

    #[test]
    fn set_get_open() {
        let mut store = Store::new();

        OpenSetCommand {
            name: "h2".into(),
            key: "k".into(),
            value: "v".into(),
        }
        .execute(&mut store)
        .unwrap();

        let get = OpenGetCommand {
            name: "h2".into(),
            key: "k".into(),
        };
        assert_eq!(get.execute(&mut store).unwrap(), Reply::Value("v".into()));
    }

    /// Одно имя не может служить таблицам двух видов.
    #[test]
    fn chain_and_open_do_not_share_names() {
        let mut store = Store::new();
        ChainSetCommand {
            name: "shared".into(),
            key: "k".into(),
            value: "v".into(),
        }
        .execute(&mut store)
        .unwrap();

        let err = OpenSetCommand {
            name: "shared".into(),
            key: "k".into(),
            value: "v".into(),
        }
        .execute(&mut store);
        assert!(err.is_err());
    }
}
