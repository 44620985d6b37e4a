use crate::{engine::Store, error::StoreResult};

/// Результат выполнения команды.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Выполнено; печатать нечего.
    Ok,
    /// Значение или готовый к выводу текст.
    Value(String),
    /// Запрошенный элемент отсутствует.
    Missing,
}

pub trait CommandExecute {
    fn execute(&self, store: &mut Store) -> StoreResult<Reply>;

    /// Меняет ли команда состояние хранилища (управляет автосейвом).
    fn mutates(&self) -> bool {
        false
    }
}
