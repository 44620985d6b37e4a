//! Разбор строки протокола и выполнение команд.
//!
//! Строка разбивается по пробелам: первый токен — имя команды, дальше
//! аргументы. Значение в HSET/H2SET склеивается из всех оставшихся
//! токенов через одиночный пробел.

pub mod array;
pub mod execute;
pub mod flist;
pub mod hash;
pub mod list;
pub mod queue;
pub mod server;
pub mod stack;
pub mod tree;

pub use execute::{CommandExecute, Reply};

use crate::error::ParseError;

use self::{
    array::{
        ArrayGetCommand, ArrayInsertCommand, ArrayPrintCommand, ArrayPushCommand,
        ArrayRemoveCommand, ArraySetCommand,
    },
    flist::{
        FListDelCommand, FListDelTarget, FListInsertAfterCommand, FListInsertBeforeCommand,
        FListPopBackCommand, FListPrintCommand, FListPushCommand, FListRemoveAfterCommand,
        FListRemoveBeforeCommand,
    },
    hash::{
        ChainDelCommand, ChainGetCommand, ChainPrintCommand, ChainSetCommand, OpenDelCommand,
        OpenGetCommand, OpenPrintCommand, OpenSetCommand,
    },
    list::{
        ListDelCommand, ListDelTarget, ListInsertAfterCommand, ListInsertBeforeCommand,
        ListPrintCommand, ListPushCommand, ListRemoveAfterCommand, ListRemoveBeforeCommand,
    },
    queue::{QueuePopCommand, QueuePrintCommand, QueuePushCommand},
    server::{HelpCommand, PrintCommand},
    stack::{StackPopCommand, StackPrintCommand, StackPushCommand},
    tree::{TreeContainsCommand, TreeInsertCommand, TreePrintCommand, TreeRemoveCommand},
};

/// Конец списка, к которому применяется PUSH/DEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Head,
    Tail,
}

/// Разбирает одну строку протокола в готовую к выполнению команду.
pub fn parse(line: &str) -> Result<Box<dyn CommandExecute>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    match cmd {
        // ---------- массив ----------
        "MPUSH" => {
            need(args, 2)?;
            Ok(Box::new(ArrayPushCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "MINSERT" => {
            need(args, 3)?;
            Ok(Box::new(ArrayInsertCommand {
                name: args[0].to_string(),
                index: parse_index(args[1])?,
                value: args[2].to_string(),
            }))
        }
        "MDEL" => {
            need(args, 2)?;
            Ok(Box::new(ArrayRemoveCommand {
                name: args[0].to_string(),
                index: parse_index(args[1])?,
            }))
        }
        "MSET" => {
            need(args, 3)?;
            Ok(Box::new(ArraySetCommand {
                name: args[0].to_string(),
                index: parse_index(args[1])?,
                value: args[2].to_string(),
            }))
        }
        "MGET" => {
            need(args, 2)?;
            Ok(Box::new(ArrayGetCommand {
                name: args[0].to_string(),
                index: parse_index(args[1])?,
            }))
        }
        "MPRINT" => {
            need(args, 1)?;
            Ok(Box::new(ArrayPrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- односвязный список ----------
        "FPUSH" => {
            need(args, 3)?;
            Ok(Box::new(FListPushCommand {
                name: args[0].to_string(),
                place: parse_place(args[1])?,
                value: args[2].to_string(),
            }))
        }
        "FDEL" => {
            need(args, 2)?;
            let target = match args[1] {
                "HEAD" => FListDelTarget::Head,
                "VAL" => {
                    need(args, 3)?;
                    FListDelTarget::Value(args[2].to_string())
                }
                other => return Err(ParseError::BadPlace(other.to_string())),
            };
            Ok(Box::new(FListDelCommand {
                name: args[0].to_string(),
                target,
            }))
        }
        "FPUSH_AFTER" => {
            need(args, 3)?;
            Ok(Box::new(FListInsertAfterCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
                value: args[2].to_string(),
            }))
        }
        "FPUSH_BEFORE" => {
            need(args, 3)?;
            Ok(Box::new(FListInsertBeforeCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
                value: args[2].to_string(),
            }))
        }
        "FDEL_AFTER" => {
            need(args, 2)?;
            Ok(Box::new(FListRemoveAfterCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
            }))
        }
        "FDEL_BEFORE" => {
            need(args, 2)?;
            Ok(Box::new(FListRemoveBeforeCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
            }))
        }
        "FDEL_TAIL" => {
            need(args, 1)?;
            Ok(Box::new(FListPopBackCommand {
                name: args[0].to_string(),
            }))
        }
        "FPRINT" => {
            need(args, 1)?;
            Ok(Box::new(FListPrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- двусвязный список ----------
        "LPUSH" => {
            need(args, 3)?;
            Ok(Box::new(ListPushCommand {
                name: args[0].to_string(),
                place: parse_place(args[1])?,
                value: args[2].to_string(),
            }))
        }
        "LDEL" => {
            need(args, 2)?;
            let target = match args[1] {
                "HEAD" => ListDelTarget::Head,
                "TAIL" => ListDelTarget::Tail,
                "VAL" => {
                    need(args, 3)?;
                    ListDelTarget::Value(args[2].to_string())
                }
                other => return Err(ParseError::BadPlace(other.to_string())),
            };
            Ok(Box::new(ListDelCommand {
                name: args[0].to_string(),
                target,
            }))
        }
        "LPUSH_AFTER" => {
            need(args, 3)?;
            Ok(Box::new(ListInsertAfterCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
                value: args[2].to_string(),
            }))
        }
        "LPUSH_BEFORE" => {
            need(args, 3)?;
            Ok(Box::new(ListInsertBeforeCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
                value: args[2].to_string(),
            }))
        }
        "LDEL_AFTER" => {
            need(args, 2)?;
            Ok(Box::new(ListRemoveAfterCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
            }))
        }
        "LDEL_BEFORE" => {
            need(args, 2)?;
            Ok(Box::new(ListRemoveBeforeCommand {
                name: args[0].to_string(),
                anchor: args[1].to_string(),
            }))
        }
        "LPRINT" => {
            need(args, 1)?;
            Ok(Box::new(ListPrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- стек ----------
        "SPUSH" => {
            need(args, 2)?;
            Ok(Box::new(StackPushCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "SPOP" => {
            need(args, 1)?;
            Ok(Box::new(StackPopCommand {
                name: args[0].to_string(),
            }))
        }
        "SPRINT" => {
            need(args, 1)?;
            Ok(Box::new(StackPrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- очередь ----------
        "QPUSH" => {
            need(args, 2)?;
            Ok(Box::new(QueuePushCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "QPOP" => {
            need(args, 1)?;
            Ok(Box::new(QueuePopCommand {
                name: args[0].to_string(),
            }))
        }
        "QPRINT" => {
            need(args, 1)?;
            Ok(Box::new(QueuePrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- АВЛ-дерево ----------
        "TINSERT" => {
            need(args, 2)?;
            Ok(Box::new(TreeInsertCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "TDEL" => {
            need(args, 2)?;
            Ok(Box::new(TreeRemoveCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "TCONTAINS" => {
            need(args, 2)?;
            Ok(Box::new(TreeContainsCommand {
                name: args[0].to_string(),
                value: args[1].to_string(),
            }))
        }
        "TPRINT" => {
            need(args, 1)?;
            Ok(Box::new(TreePrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- хеш-таблицы ----------
        "HSET" => {
            need(args, 3)?;
            Ok(Box::new(ChainSetCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
                value: args[2..].join(" "),
            }))
        }
        "HGET" => {
            need(args, 2)?;
            Ok(Box::new(ChainGetCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
            }))
        }
        "HDEL" => {
            need(args, 2)?;
            Ok(Box::new(ChainDelCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
            }))
        }
        "HPRINT" => {
            need(args, 1)?;
            Ok(Box::new(ChainPrintCommand {
                name: args[0].to_string(),
            }))
        }
        "H2SET" => {
            need(args, 3)?;
            Ok(Box::new(OpenSetCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
                value: args[2..].join(" "),
            }))
        }
        "H2GET" => {
            need(args, 2)?;
            Ok(Box::new(OpenGetCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
            }))
        }
        "H2DEL" => {
            need(args, 2)?;
            Ok(Box::new(OpenDelCommand {
                name: args[0].to_string(),
                key: args[1].to_string(),
            }))
        }
        "H2PRINT" => {
            need(args, 1)?;
            Ok(Box::new(OpenPrintCommand {
                name: args[0].to_string(),
            }))
        }

        // ---------- общие ----------
        "PRINT" => {
            need(args, 1)?;
            Ok(Box::new(PrintCommand {
                name: args[0].to_string(),
            }))
        }
        "HELP" => Ok(Box::new(HelpCommand)),

        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn need(args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() < expected {
        return Err(ParseError::WrongArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_index(token: &str) -> Result<usize, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::BadIndex(token.to_string()))
}

fn parse_place(token: &str) -> Result<Place, ParseError> {
    match token {
        "HEAD" => Ok(Place::Head),
        "TAIL" => Ok(Place::Tail),
        other => Err(ParseError::BadPlace(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_error() {
        assert_eq!(parse("").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("   ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn unknown_command_is_error() {
        assert!(matches!(
            parse("FROBNICATE x"),
            Err(ParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn missing_arguments_is_error() {
        assert!(matches!(
            parse("TINSERT only-name"),
            Err(ParseError::WrongArgumentCount { .. })
        ));
    }

    #[test]
    fn bad_index_is_error() {
        assert!(matches!(parse("MGET a x"), Err(ParseError::BadIndex(_))));
    }

    #[test]
    fn bad_place_is_error() {
        assert!(matches!(parse("FPUSH f MID v"), Err(ParseError::BadPlace(_))));
        assert!(matches!(parse("LDEL l MID"), Err(ParseError::BadPlace(_))));
    }

    /// Значение HSET склеивается из остатка строки.
    #[test]
    fn hset_joins_value_tokens() {
        let mut store = crate::engine::Store::new();
        let cmd = parse("HSET h key a b c").unwrap();
        cmd.execute(&mut store).unwrap();
        assert_eq!(store.chain("h").unwrap().find("key"), Some("a b c"));
    }
}
