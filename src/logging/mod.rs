//! Инициализация логирования.
//!
//! Фильтр берётся из RUST_LOG, если переменная установлена, иначе из
//! настроек процесса.

use tracing_subscriber::EnvFilter;

pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
