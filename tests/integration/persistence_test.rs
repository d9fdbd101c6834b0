//! Store file persistence across console sessions.

use super::common::TestConsole;
use hbnb_console::console::Console;
use hbnb_console::models::EntityClass;
use hbnb_console::persistence::FileStorage;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn test_created_instance_survives_reopen() {
    let mut t = TestConsole::new();
    let id = t.create("Place");
    t.exec(&format!("update Place {id} number_rooms 3"));
    t.exec(&format!("update Place {id} name \"Cozy cabin\""));
    let shown = t.exec(&format!("show Place {id}"));

    let reopened = FileStorage::open(t.store_path()).unwrap();
    let place = reopened.get(EntityClass::Place, &id).unwrap();
    assert_eq!(place.get("number_rooms"), Some(&json!(3)));
    assert_eq!(place.get("name"), Some(&json!("Cozy cabin")));

    let mut console = Console::new(reopened);
    let mut out = Vec::new();
    console
        .execute(&format!("show Place {id}"))
        .write_to(&mut out)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), shown);
}

#[test]
fn test_destroy_is_persisted() {
    let mut t = TestConsole::new();
    let kept = t.create("User");
    let gone = t.create("User");
    t.exec(&format!("destroy User {gone}"));

    let reopened = FileStorage::open(t.store_path()).unwrap();
    assert!(reopened.get(EntityClass::User, &kept).is_some());
    assert!(reopened.get(EntityClass::User, &gone).is_none());
    assert_eq!(reopened.count(EntityClass::User), 1);
}

#[test]
fn test_store_file_layout() {
    let mut t = TestConsole::new();
    let id = t.create("State");

    let content = std::fs::read_to_string(t.store_path()).unwrap();
    let file: Value = serde_json::from_str(&content).unwrap();
    let record = &file[format!("State.{id}")];
    assert_eq!(record["__class__"], json!("State"));
    assert_eq!(record["id"], json!(id));
    assert!(record["created_at"].is_string());
    assert!(record["updated_at"].is_string());
}

#[test]
fn test_failed_commands_leave_store_untouched() {
    let mut t = TestConsole::new();
    t.exec("create Galaxy");
    t.exec("destroy User 1234");
    t.exec("update User 1234 name x");
    assert!(!t.store_path().exists());
}
