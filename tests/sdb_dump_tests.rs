use sunduk::{
    engine::{autoload, load_from_sdb, load_from_text, save_to_sdb, save_to_text},
    Store, StoreError,
};
use tempfile::tempdir;

fn populated_store() -> Store {
    let mut store = Store::new();

    let tree = store.tree_or_create("fruits").unwrap();
    for v in ["mango", "apple", "plum"] {
        tree.insert(v);
    }

    let chain = store.chain_or_create("config").unwrap();
    chain.insert("host", "localhost");
    chain.insert("port", "6174");

    let open = store.open_or_create("cache").unwrap();
    open.insert("a", "1");
    open.insert("b", "2");
    open.erase("a");

    store.array_or_create("log").unwrap().push_back("started");
    store.stack_or_create("undo").unwrap().push("op1");
    store.queue_or_create("jobs").unwrap().push("job1");
    store.flist_or_create("fwd").unwrap().push_back("x");
    store.llist_or_create("dbl").unwrap().push_back("y");

    store
}

#[test]
fn binary_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.sdb");

    let store = populated_store();
    save_to_sdb(&path, &store).unwrap();
    let restored = load_from_sdb(&path).unwrap();

    assert_eq!(restored.len(), store.len());
    let mut restored = restored;
    assert!(restored.tree("fruits").unwrap().contains("apple"));
    assert_eq!(restored.chain("config").unwrap().find("port"), Some("6174"));

    // tombstone не пережил дамп, живая запись — да
    let cache = restored.open("cache").unwrap();
    assert_eq!(cache.find("a"), None);
    assert_eq!(cache.find("b"), Some("2"));
}

#[test]
fn text_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.txt");

    let store = populated_store();
    save_to_text(&path, &store).unwrap();
    let mut restored = load_from_text(&path).unwrap();

    assert_eq!(restored.len(), store.len());
    assert!(restored.tree("fruits").unwrap().contains("plum"));
    assert_eq!(restored.array("log").unwrap().get(0), Some("started"));
    assert_eq!(restored.stack("undo").unwrap().peek(), Some("op1"));
    assert_eq!(restored.queue("jobs").unwrap().front(), Some("job1"));
}

#[test]
fn corrupted_binary_dump_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.sdb");

    let store = populated_store();
    save_to_sdb(&path, &store).unwrap();

    // портим magic
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[0] = b'X';
    std::fs::write(&path, &bytes).unwrap();

    let err = load_from_sdb(&path);
    assert!(matches!(err, Err(StoreError::MalformedStream(_))));
}

#[test]
fn truncated_binary_dump_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.sdb");

    let store = populated_store();
    save_to_sdb(&path, &store).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = load_from_sdb(&path);
    assert!(matches!(err, Err(StoreError::MalformedStream(_))));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_from_sdb(&dir.path().join("no-such.sdb"));
    assert!(matches!(err, Err(StoreError::Io(_))));
}

/// При старте бинарный дамп побеждает текстовый, даже если оба на месте.
#[test]
fn autoload_prefers_binary_dump() {
    let dir = tempdir().unwrap();
    let bin = dir.path().join("autosave.sdb");
    let txt = dir.path().join("autosave.txt");

    let mut from_binary = Store::new();
    from_binary.stack_or_create("origin").unwrap().push("binary");
    save_to_sdb(&bin, &from_binary).unwrap();

    let mut from_text = Store::new();
    from_text.stack_or_create("origin").unwrap().push("text");
    save_to_text(&txt, &from_text).unwrap();

    let mut loaded = autoload(&bin, &txt);
    assert_eq!(loaded.stack("origin").unwrap().peek(), Some("binary"));
}

/// Испорченный бинарный дамп не роняет старт: загружается текстовый.
#[test]
fn autoload_falls_back_to_text() {
    let dir = tempdir().unwrap();
    let bin = dir.path().join("autosave.sdb");
    let txt = dir.path().join("autosave.txt");

    std::fs::write(&bin, b"not a dump").unwrap();
    let mut from_text = Store::new();
    from_text.stack_or_create("origin").unwrap().push("text");
    save_to_text(&txt, &from_text).unwrap();

    let mut loaded = autoload(&bin, &txt);
    assert_eq!(loaded.stack("origin").unwrap().peek(), Some("text"));
}

/// Нет ни одного дампа — пустое хранилище без ошибок.
#[test]
fn autoload_without_dumps_is_empty() {
    let dir = tempdir().unwrap();
    let loaded = autoload(
        &dir.path().join("autosave.sdb"),
        &dir.path().join("autosave.txt"),
    );
    assert!(loaded.is_empty());
}

/// Пустое хранилище корректно ходит туда и обратно в обоих форматах.
#[test]
fn empty_store_roundtrip() {
    let dir = tempdir().unwrap();
    let store = Store::new();

    let bin = dir.path().join("empty.sdb");
    save_to_sdb(&bin, &store).unwrap();
    assert!(load_from_sdb(&bin).unwrap().is_empty());

    let txt = dir.path().join("empty.txt");
    save_to_text(&txt, &store).unwrap();
    assert!(load_from_text(&txt).unwrap().is_empty());
}
