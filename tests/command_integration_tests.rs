use sunduk::{parse, Reply, Store};

fn run(store: &mut Store, line: &str) -> Reply {
    parse(line)
        .unwrap_or_else(|err| panic!("parse failed for {line:?}: {err}"))
        .execute(store)
        .unwrap_or_else(|err| panic!("execute failed for {line:?}: {err}"))
}

#[test]
fn tree_commands_end_to_end() {
    let mut store = Store::new();

    run(&mut store, "TINSERT names bob");
    run(&mut store, "TINSERT names alice");
    run(&mut store, "TINSERT names carol");

    assert_eq!(run(&mut store, "TCONTAINS names alice"), Reply::Value("true".into()));
    run(&mut store, "TDEL names alice");
    assert_eq!(run(&mut store, "TCONTAINS names alice"), Reply::Value("false".into()));

    let Reply::Value(printed) = run(&mut store, "TPRINT names") else {
        panic!("TPRINT must return text");
    };
    assert!(printed.contains("bob"));
    assert!(printed.contains("carol"));
}

#[test]
fn chained_hash_commands_join_value() {
    let mut store = Store::new();

    run(&mut store, "HSET conf greeting hello brave new world");
    assert_eq!(
        run(&mut store, "HGET conf greeting"),
        Reply::Value("hello brave new world".into())
    );

    run(&mut store, "HDEL conf greeting");
    assert_eq!(run(&mut store, "HGET conf greeting"), Reply::Missing);
}

#[test]
fn open_hash_commands() {
    let mut store = Store::new();

    run(&mut store, "H2SET cache k1 v1");
    run(&mut store, "H2SET cache k2 v2");
    run(&mut store, "H2DEL cache k1");

    assert_eq!(run(&mut store, "H2GET cache k1"), Reply::Missing);
    assert_eq!(run(&mut store, "H2GET cache k2"), Reply::Value("v2".into()));
}

#[test]
fn array_commands() {
    let mut store = Store::new();

    run(&mut store, "MPUSH arr one");
    run(&mut store, "MPUSH arr three");
    run(&mut store, "MINSERT arr 1 two");

    assert_eq!(run(&mut store, "MGET arr 1"), Reply::Value("two".into()));
    assert_eq!(run(&mut store, "MGET arr 9"), Reply::Missing);

    run(&mut store, "MDEL arr 0");
    assert_eq!(run(&mut store, "MGET arr 0"), Reply::Value("two".into()));
}

#[test]
fn list_commands_head_tail() {
    let mut store = Store::new();

    run(&mut store, "FPUSH fl TAIL b");
    run(&mut store, "FPUSH fl HEAD a");
    run(&mut store, "FPUSH_AFTER fl b c");
    run(&mut store, "FDEL_TAIL fl");

    let Reply::Value(printed) = run(&mut store, "FPRINT fl") else {
        panic!()
    };
    assert_eq!(printed, "ForwardList(size=2): a b");

    run(&mut store, "LPUSH ll TAIL x");
    run(&mut store, "LPUSH ll TAIL y");
    run(&mut store, "LDEL ll TAIL");

    let Reply::Value(printed) = run(&mut store, "LPRINT ll") else {
        panic!()
    };
    assert_eq!(printed, "List(size=1): x");
}

#[test]
fn stack_and_queue_commands() {
    let mut store = Store::new();

    run(&mut store, "SPUSH st a");
    run(&mut store, "SPUSH st b");
    assert_eq!(run(&mut store, "SPOP st"), Reply::Value("b".into()));

    run(&mut store, "QPUSH qu a");
    run(&mut store, "QPUSH qu b");
    assert_eq!(run(&mut store, "QPOP qu"), Reply::Value("a".into()));
}

#[test]
fn generic_print_works_for_any_kind() {
    let mut store = Store::new();
    run(&mut store, "SPUSH st x");

    let Reply::Value(printed) = run(&mut store, "PRINT st") else {
        panic!()
    };
    assert!(printed.starts_with("Stack(size=1"));
}

#[test]
fn errors_do_not_corrupt_store() {
    let mut store = Store::new();
    run(&mut store, "TINSERT t v");

    // неверный вид коллекции для имени
    assert!(parse("HSET t k v").unwrap().execute(&mut store).is_err());
    // неизвестное имя
    assert!(parse("SPOP ghost").unwrap().execute(&mut store).is_err());

    assert_eq!(run(&mut store, "TCONTAINS t v"), Reply::Value("true".into()));
    assert_eq!(store.len(), 1);
}

#[test]
fn mutating_commands_are_flagged() {
    for line in ["TINSERT t v", "HSET h k v", "MPUSH a x", "SPUSH s x", "QPUSH q x"] {
        assert!(parse(line).unwrap().mutates(), "{line} must mutate");
    }
    for line in ["TPRINT t", "HGET h k", "MGET a 0", "HELP", "PRINT x", "TCONTAINS t v"] {
        assert!(!parse(line).unwrap().mutates(), "{line} must not mutate");
    }
}
