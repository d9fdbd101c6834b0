//! End-to-end command tests through the console.

use super::common::TestConsole;
use hbnb_console::console::ReplState;
use hbnb_console::models::{value_repr, EntityClass};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn entries(listing: &str, class: &str) -> usize {
    listing.matches(&format!("[{class}] (")).count()
}

#[test]
fn test_create_prints_id_and_adds_entry() {
    let mut t = TestConsole::new();
    let id = t.create("User");

    assert!(id.len() >= 32, "id too short: {id}");
    let key = format!("User.{id}");
    assert!(t.console.store().all().contains_key(&key));
}

#[test]
fn test_create_then_all_grows_by_one_for_every_class() {
    let mut t = TestConsole::new();
    for class in EntityClass::ALL {
        let before = entries(&t.exec(&format!("all {class}")), class.name());
        t.create(class.name());
        let after = entries(&t.exec(&format!("all {class}")), class.name());
        assert_eq!(after, before + 1, "class {class}");
    }
    assert_eq!(entries(&t.exec("all"), "User"), 1);
}

#[test]
fn test_show_after_create() {
    let mut t = TestConsole::new();
    let id = t.create("City");
    let shown = t.exec(&format!("show City {id}"));
    assert!(shown.starts_with(&format!("[City] ({id}) {{'id': '{id}'")));
}

#[test]
fn test_show_missing_instance() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("show User 1234"), "** no instance found **\n");
}

#[test]
fn test_destroy_then_show_not_found() {
    let mut t = TestConsole::new();
    let id = t.create("Review");
    assert_eq!(t.exec(&format!("destroy Review {id}")), "");
    assert_eq!(
        t.exec(&format!("show Review {id}")),
        "** no instance found **\n"
    );
}

#[test]
fn test_create_without_class() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("create"), "** class name missing **\n");
    assert!(t.console.store().all().is_empty());
    assert!(!t.store_path().exists());
}

#[test]
fn test_destroy_unknown_class() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("destroy Galaxy 1"), "** class doesn't exist **\n");
}

#[test]
fn test_count_empty_class() {
    let mut t = TestConsole::new();
    t.create("State");
    assert_eq!(t.exec("count User"), "0\n");
    assert_eq!(t.exec("User.count()"), "0\n");
    assert_eq!(t.exec("State.count()"), "1\n");
}

#[test]
fn test_count_requires_class() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("count"), "** class name missing **\n");
    assert_eq!(t.exec("count Galaxy"), "** class doesn't exist **\n");
}

#[test]
fn test_update_reflects_coerced_value() {
    let mut t = TestConsole::new();
    let id = t.create("Place");

    for (attr, raw) in [("max_guest", "6"), ("longitude", "-122.4"), ("nickname", "cabin")] {
        t.exec(&format!("update Place {id} {attr} {raw}"));
        let expected = EntityClass::Place.coerce(attr, Value::String(raw.to_string()));
        let shown = t.exec(&format!("show Place {id}"));
        assert!(
            shown.contains(&format!("'{attr}': {}", value_repr(&expected))),
            "{attr} not in {shown}"
        );
    }
}

#[test]
fn test_dotted_update_matches_canonical() {
    let mut dotted = TestConsole::new();
    let id = dotted.create("User");
    assert_eq!(
        dotted.exec(&format!("User.update(\"{id}\", \"first_name\", \"Betty\")")),
        ""
    );

    let mut canonical = TestConsole::new();
    let other = canonical.create("User");
    canonical.exec(&format!("update User {other} first_name Betty"));

    for (t, id) in [(&dotted, &id), (&canonical, &other)] {
        let user = t.console.store().get(EntityClass::User, id).unwrap();
        assert_eq!(user.get("first_name").and_then(|v| v.as_str()), Some("Betty"));
    }
}

#[test]
fn test_dotted_update_with_mapping() {
    let mut t = TestConsole::new();
    let id = t.create("User");
    t.exec(&format!(
        "User.update(\"{id}\", {{'first_name': \"John\", \"age\": 89}})"
    ));

    let shown = t.exec(&format!("User.show(\"{id}\")"));
    assert!(shown.contains("'first_name': 'John'"));
    assert!(shown.contains("'age': 89"));
}

#[test]
fn test_dotted_and_canonical_show_identical() {
    let mut t = TestConsole::new();
    let id = t.create("Amenity");
    assert_eq!(
        t.exec(&format!("Amenity.show({id})")),
        t.exec(&format!("show Amenity {id}"))
    );
    assert_eq!(t.exec("Amenity.show()"), t.exec("show Amenity"));
    assert_eq!(t.exec("Amenity.all()"), t.exec("all Amenity"));
}

#[test]
fn test_dotted_destroy() {
    let mut t = TestConsole::new();
    let id = t.create("State");
    t.exec(&format!("State.destroy(\"{id}\")"));
    assert_eq!(t.exec("count State"), "0\n");
}

#[test]
fn test_all_is_idempotent() {
    let mut t = TestConsole::new();
    t.create("User");
    t.create("Place");
    assert_eq!(t.exec("all"), t.exec("all"));
}

#[test]
fn test_all_empty_store() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("all"), "[]\n");
    assert_eq!(t.exec("all User"), "[]\n");
}

#[test]
fn test_update_validation_messages() {
    let mut t = TestConsole::new();
    let id = t.create("User");
    assert_eq!(t.exec("update"), "** class name missing **\n");
    assert_eq!(t.exec("update Galaxy"), "** class doesn't exist **\n");
    assert_eq!(t.exec("update User"), "** instance id missing **\n");
    assert_eq!(t.exec("update User 42"), "** no instance found **\n");
    assert_eq!(
        t.exec(&format!("update User {id}")),
        "** attribute name missing **\n"
    );
    assert_eq!(
        t.exec(&format!("update User {id} email")),
        "** value missing **\n"
    );
}

#[test]
fn test_unknown_syntax() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("hello"), "*** Unknown syntax: hello\n");
    assert_eq!(t.exec("User.fly()"), "*** Unknown syntax: User.fly()\n");
    assert_eq!(t.exec("User.create()"), "*** Unknown syntax: User.create()\n");
    assert_eq!(t.exec("User.all"), "*** Unknown syntax: User.all\n");
    assert_eq!(t.console.state(), ReplState::AwaitingInput);
}

#[test]
fn test_empty_line_does_nothing() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec(""), "");
    assert_eq!(t.exec("   "), "");
}

#[test]
fn test_help() {
    let mut t = TestConsole::new();
    let overview = t.exec("help");
    for name in ["EOF", "all", "count", "create", "destroy", "quit", "show", "update"] {
        assert!(overview.contains(name), "help is missing {name}");
    }
    assert!(t.exec("help update").starts_with("Usage: update <class> <id>"));
    assert_eq!(t.exec("help fly"), "*** No help on fly\n");
}

#[test]
fn test_quit_and_eof() {
    let mut t = TestConsole::new();
    assert_eq!(t.exec("quit"), "");
    assert_eq!(t.console.state(), ReplState::Terminated);

    let mut t = TestConsole::new();
    assert_eq!(t.exec("EOF"), "\n");
    assert_eq!(t.console.state(), ReplState::Terminated);
}
