use json_edit_pointer::{
    format_json_pointer, get_path, parse_json_pointer, resolve_path, resolve_pointer,
    JsonPointerError, PathStep,
};
use serde_json::json;

#[test]
fn test_resolve_types_steps_against_document() {
    let doc = json!({
        "server": {"hoursSchedule": [0, 1, 2], "SMTPConfig": {"port": 465}},
        "0": {"1": "numeric keys"}
    });

    let path = resolve_pointer(&doc, "/server/hoursSchedule/2").unwrap();
    assert_eq!(
        path,
        vec![
            PathStep::Key("server".into()),
            PathStep::Key("hoursSchedule".into()),
            PathStep::Index(2),
        ]
    );
    assert_eq!(get_path(&doc, &path), Some(&json!(2)));

    let path = resolve_pointer(&doc, "/0/1").unwrap();
    assert_eq!(path, vec![PathStep::Key("0".into()), PathStep::Key("1".into())]);
}

#[test]
fn test_format_then_parse_preserves_special_keys() {
    let doc = json!({"a/b": {"c~d": [true]}});
    let path = vec![PathStep::from("a/b"), PathStep::from("c~d"), PathStep::from(0usize)];
    let pointer = format_json_pointer(&path);
    assert_eq!(pointer, "/a~1b/c~0d/0");
    let components = parse_json_pointer(&pointer).unwrap();
    assert_eq!(resolve_path(&doc, &components).unwrap(), path);
}

#[test]
fn test_out_of_bounds_index() {
    let doc = json!({"list": ["a"]});
    assert_eq!(
        resolve_pointer(&doc, "/list/1"),
        Err(JsonPointerError::NotFound("1".to_string()))
    );
}

#[test]
fn test_relative_pointer_rejected() {
    let doc = json!({});
    assert!(matches!(
        resolve_pointer(&doc, "list"),
        Err(JsonPointerError::Invalid(_))
    ));
}
