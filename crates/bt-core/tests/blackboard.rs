use bt_core::{Blackboard, BlackboardEntryMetadata, BlackboardError, Value, ValueKind};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains("age"));

    bb.set("age", 32);
    bb.set("name", "ada");

    assert_eq!(bb.get("age"), Ok(Value::Int(32)));
    assert_eq!(bb.get_entry("age").unwrap().kind, ValueKind::Int);
    assert_eq!(bb.get_as::<String>("name").as_deref(), Ok("ada"));
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.remove("age"), Ok(Value::Int(32)));
    assert_eq!(bb.get("age"), Err(BlackboardError::key_not_found("age")));
    assert!(bb.get_entry("age").is_err());
    assert_eq!(bb.len(), 1);
}

#[test]
fn unseen_key_is_autoregistered_with_written_kind() {
    let mut bb = Blackboard::new();
    bb.set("age", 32);

    let entry = bb.get_entry("age").unwrap();
    assert_eq!(entry.key, "age");
    assert_eq!(entry.description, "Autogenerated entry");
    assert_eq!(entry.kind, ValueKind::Int);
}

#[test]
fn set_entry_new_description_keeps_kind() {
    let mut bb = Blackboard::new();
    bb.set("age", 32);

    bb.set_entry("age", Some("An age"), None).unwrap();

    let entry = bb.get_entry("age").unwrap();
    assert_eq!(entry.key, "age");
    assert_eq!(entry.description, "An age");
    assert_eq!(entry.kind, ValueKind::Int);
}

#[test]
fn set_entry_new_kind_coerces_later_reads() {
    let mut bb = Blackboard::new();
    bb.set("age", 32);

    bb.set_entry("age", None, Some(ValueKind::Float)).unwrap();

    assert_eq!(bb.get_entry("age").unwrap().description, "Autogenerated entry");
    assert_eq!(bb.get("age"), Ok(Value::Float(32.0)));
    assert_eq!(bb.get_as::<f64>("age"), Ok(32.0));
    // The stored value itself is untouched.
    assert_eq!(bb.get_raw("age"), Some(&Value::Int(32)));
}

#[test]
fn float_entry_retyped_to_int() {
    let mut bb = Blackboard::new();
    bb.set("age", 32.0);
    assert_eq!(bb.get_entry("age").unwrap().kind, ValueKind::Float);

    bb.set_entry("age", None, Some(ValueKind::Int)).unwrap();
    assert_eq!(bb.get("age"), Ok(Value::Int(32)));
}

#[test]
fn uncoercible_read_reports_the_key() {
    let mut bb = Blackboard::new();
    bb.set("age", 32.5);
    bb.set_entry("age", None, Some(ValueKind::Int)).unwrap();

    match bb.get("age") {
        Err(BlackboardError::Coercion { key, source }) => {
            assert_eq!(key, "age");
            assert_eq!(source.from, ValueKind::Float);
            assert_eq!(source.to, ValueKind::Int);
        }
        other => panic!("expected coercion error, got {other:?}"),
    }
}

#[test]
fn writes_are_permissive_after_registration() {
    let mut bb = Blackboard::new();
    bb.register_entry(BlackboardEntryMetadata::new("speed", "m/s", ValueKind::Float));

    // Registered but never written.
    assert_eq!(bb.get("speed"), Err(BlackboardError::key_not_found("speed")));

    bb.set("speed", 3);
    assert_eq!(bb.get_entry("speed").unwrap().description, "m/s");
    assert_eq!(bb.get("speed"), Ok(Value::Float(3.0)));
}

#[test]
fn missing_keys_are_errors() {
    let mut bb = Blackboard::new();
    assert_eq!(bb.remove("ghost"), Err(BlackboardError::key_not_found("ghost")));
    assert_eq!(
        bb.set_entry("ghost", Some("boo"), None),
        Err(BlackboardError::key_not_found("ghost"))
    );
}

#[test]
fn keys_iterate_in_order() {
    let mut bb = Blackboard::new();
    bb.set("b", 2);
    bb.set("a", 1);

    let keys: Vec<&str> = bb.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);

    let pairs: Vec<(&str, &Value)> = bb.iter().collect();
    assert_eq!(pairs, vec![("a", &Value::Int(1)), ("b", &Value::Int(2))]);
}
