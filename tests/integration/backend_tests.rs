use skillgraph::config::{Config, StorageBackend};
use skillgraph::core::skill::{NewSkill, SkillUpdate};
use skillgraph::storage::{JsonFileStorage, Persistence, SqliteStorage};
use skillgraph::store::SkillStore;
use tempfile::TempDir;

fn populate(store: &mut SkillStore) {
    store.add_skill(NewSkill::new("HTML", "Web", 8));
    store.add_skill(NewSkill::new("CSS", "Web", 2));
    store
        .add_skill_dependency("html", "css", Some(6), Some("markup first".into()))
        .unwrap();
    store.update_skill("css", SkillUpdate::proficiency(3));
}

#[test]
fn test_json_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");

    let mut store = SkillStore::open(JsonFileStorage::new(&path));
    populate(&mut store);
    let expected = store.state().clone();
    drop(store);

    let reopened = SkillStore::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.state().skill("css").unwrap().proficiency, 3);
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skills.db");

    let mut store = SkillStore::open(SqliteStorage::open(&path).unwrap());
    populate(&mut store);
    let expected = store.state().clone();
    drop(store);

    let reopened = SkillStore::open(SqliteStorage::open(&path).unwrap());
    assert_eq!(reopened.state(), &expected);
}

#[test]
fn test_corrupt_json_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, r#"{"skills": "not a list"}"#).unwrap();

    let store = SkillStore::open(JsonFileStorage::new(&path));
    assert!(store.state().is_empty());
}

#[test]
fn test_json_document_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");
    let mut store = SkillStore::open(JsonFileStorage::new(&path));
    populate(&mut store);

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let dep = &value["skillDependencies"][0];
    assert_eq!(dep["fromSkillId"], "html");
    assert_eq!(dep["toSkillId"], "css");
    assert_eq!(dep["requiredProficiency"], 6);
    assert_eq!(dep["description"], "markup first");
    assert!(value["skills"][0]["createdAt"].is_string());
}

#[test]
fn test_open_store_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.path = Some(dir.path().join("nested/skills.db"));

    let mut store = skillgraph::app::open_store(&config).unwrap();
    populate(&mut store);
    assert!(store.backend().describe().ends_with("skills.db"));
    assert!(dir.path().join("nested/skills.db").exists());

    store.backend().clear().unwrap();
    assert!(store.backend().load().unwrap().is_none());
}
