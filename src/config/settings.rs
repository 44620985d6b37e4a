use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Настройки процесса.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Каталог, где живут файлы автосохранения.
    pub data_dir: String,
    /// Сохранять ли хранилище после каждой мутирующей команды.
    pub autosave: bool,
    /// Уровень логирования по умолчанию (перекрывается RUST_LOG).
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Adding default values
            .set_default("data_dir", ".")?
            .set_default("autosave", true)?
            .set_default("log_level", "info")?
            // Add environment variables with the SUNDUK_ prefix
            .add_source(Environment::with_prefix("SUNDUK").try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }

    pub fn text_dump_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("autosave.txt")
    }

    pub fn binary_dump_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("autosave.sdb")
    }
}
