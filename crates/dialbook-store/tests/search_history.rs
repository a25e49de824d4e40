use dialbook_store::Store;
use tempfile::TempDir;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

#[test]
fn duplicate_queries_are_stored_once() {
    let store = store();
    let history = store.search_history();
    assert!(history.add(1, "x").expect("add"));
    assert!(!history.add(2, "x").expect("add again"));

    assert_eq!(history.list().expect("list"), vec!["x".to_string()]);
}

#[test]
fn blank_queries_are_ignored() {
    let store = store();
    let history = store.search_history();
    assert!(!history.add(1, "").expect("add empty"));
    assert!(!history.add(1, "   ").expect("add blank"));
    assert!(history.list().expect("list").is_empty());
}

#[test]
fn list_is_newest_insertion_first_and_readd_keeps_position() {
    let store = store();
    let history = store.search_history();
    history.add(1, "ada").expect("add");
    history.add(2, "grace").expect("add");
    history.add(3, "alan").expect("add");
    history.add(4, "ada").expect("re-add");

    assert_eq!(
        history.list().expect("list"),
        vec!["alan".to_string(), "grace".to_string(), "ada".to_string()]
    );
}

#[test]
fn remove_and_clear() {
    let store = store();
    let history = store.search_history();
    history.add(1, "ada").expect("add");
    history.add(2, "grace").expect("add");

    assert!(history.remove("ada").expect("remove"));
    assert!(!history.remove("missing").expect("remove missing"));
    assert_eq!(history.list().expect("list"), vec!["grace".to_string()]);

    assert_eq!(history.clear().expect("clear"), 1);
    assert!(history.list().expect("list").is_empty());
}

#[test]
fn history_survives_reopen() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("dialbook.sqlite3");
    {
        let store = Store::open(&path).expect("open");
        store.migrate().expect("migrate");
        store.search_history().add(1, "lovelace").expect("add");
    }

    let store = Store::open(&path).expect("reopen");
    store.migrate().expect("migrate");
    assert_eq!(
        store.search_history().list().expect("list"),
        vec!["lovelace".to_string()]
    );
}
