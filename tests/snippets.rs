use aicodex::settings::Settings;
use aicodex::snippets::{load_snippets, save_snippets, Snippet, SnippetStore};
use tempfile::tempdir;

fn store() -> SnippetStore {
    SnippetStore::from_settings(&Settings::default().snippets)
}

#[test]
fn load_save_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    let path = path.to_str().unwrap();

    let entries = vec![Snippet {
        name: "hw".into(),
        code: "hello".into(),
    }];
    save_snippets(path, &entries).unwrap();
    assert_eq!(load_snippets(path).unwrap(), entries);
}

#[test]
fn missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("none.json");
    assert!(load_snippets(path.to_str().unwrap()).unwrap().is_empty());
}

#[test]
fn search_prefers_best_match() {
    let store = store();
    let results = store.search("python");
    assert!(!results.is_empty());
    assert_eq!(results[0].name, "Python Function");
}

#[test]
fn empty_query_returns_everything_in_order() {
    let store = store();
    let names: Vec<&str> = store.search("  ").iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Python Function", "JavaScript Function"]);
}

#[test]
fn add_rejects_duplicate_names_and_remove_works() {
    let mut store = store();
    let dup = Snippet {
        name: "Python Function".into(),
        code: "pass".into(),
    };
    assert!(!store.add(dup));
    assert!(store.add(Snippet {
        name: "Rust Test".into(),
        code: "#[test]\nfn it_works() {}".into(),
    }));
    assert_eq!(store.all().len(), 3);
    assert!(store.get("Rust Test").is_some());
    assert!(store.remove("Rust Test"));
    assert!(!store.remove("Rust Test"));
    assert_eq!(store.all().len(), 2);
}
