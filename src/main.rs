//! Интерактивная консоль sunduk.
//!
//! Читает команды протокола построчно, выполняет их над хранилищем
//! именованных коллекций и автосохраняет его после каждой мутации.
//! При старте хранилище восстанавливается из бинарного дампа, если он
//! есть, иначе из текстового.

use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::warn;

use sunduk::{
    command::{self, Reply},
    config::Settings,
    engine::{autoload, save_to_sdb, save_to_text, Store},
    logging,
};

fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init_logging(&settings.log_level);

    let mut store = autoload(&settings.binary_dump_path(), &settings.text_dump_path());
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("sunduk> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                if line == "EXIT" || line == "QUIT" {
                    break;
                }
                run_line(&line, &mut store, &settings);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!(%err, "readline failed");
                break;
            }
        }
    }

    Ok(())
}

fn run_line(line: &str, store: &mut Store, settings: &Settings) {
    let cmd = match command::parse(line) {
        Ok(cmd) => cmd,
        Err(err) => {
            println!("(error) {err}");
            return;
        }
    };

    match cmd.execute(store) {
        Ok(Reply::Ok) => {}
        Ok(Reply::Value(text)) => println!("{}", text.trim_end_matches('\n')),
        Ok(Reply::Missing) => println!("<NONE>"),
        Err(err) => {
            println!("(error) {err}");
            return;
        }
    }

    if cmd.mutates() && settings.autosave {
        autosave(store, settings);
    }
}

/// Пишет оба дампа; неудача автосейва не роняет консоль.
fn autosave(store: &Store, settings: &Settings) {
    if let Err(err) = save_to_text(&settings.text_dump_path(), store) {
        warn!(%err, "text autosave failed");
    }
    if let Err(err) = save_to_sdb(&settings.binary_dump_path(), store) {
        warn!(%err, "binary autosave failed");
    }
}
