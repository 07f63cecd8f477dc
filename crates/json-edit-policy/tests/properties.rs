use json_edit_policy::{
    resolve_capabilities, resolve_customization, walk, CapabilitySet, CustomNodeDefinition,
    EditorConfig, JsonNode, Restriction,
};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::ops::ControlFlow;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z~/ ]{1,4}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn count_nodes(value: &Value) -> usize {
    1 + match value {
        Value::Array(arr) => arr.iter().map(count_nodes).sum(),
        Value::Object(map) => map.values().map(count_nodes).sum(),
        _ => 0,
    }
}

fn nodes(root: &Value) -> Vec<JsonNode<'_>> {
    let mut out = Vec::new();
    walk::<(), _>(root, |node| {
        out.push(node.clone());
        ControlFlow::Continue(())
    });
    out
}

proptest! {
    #[test]
    fn prop_no_rules_is_permissive(data in arb_json()) {
        let config = EditorConfig::new();
        for node in nodes(&data) {
            prop_assert_eq!(resolve_capabilities(&node, &config).unwrap(), CapabilitySet::permissive());
        }
    }

    #[test]
    fn prop_always_forbidden(data in arb_json()) {
        let config = EditorConfig::new()
            .with_restrict_edit(Restriction::when(|_| true))
            .with_restrict_delete(true)
            .with_restrict_add(Restriction::Always);
        for node in nodes(&data) {
            let caps = resolve_capabilities(&node, &config).unwrap();
            prop_assert!(!caps.can_edit);
            prop_assert!(!caps.can_delete);
            prop_assert!(!caps.can_add);
        }
    }

    #[test]
    fn prop_walk_visits_every_node_once(data in arb_json()) {
        let visited = nodes(&data);
        prop_assert_eq!(visited.len(), count_nodes(&data));
        for node in &visited {
            prop_assert!(node.validate().is_ok());
            prop_assert_eq!(node.level, node.path.len());
            let again = JsonNode::at_pointer(&data, &node.pointer()).unwrap();
            prop_assert_eq!(again.path, node.path.clone());
        }
    }

    #[test]
    fn prop_first_match_wins(data in arb_json()) {
        let definitions = vec![
            CustomNodeDefinition::new(json_edit_policy::filter(|n| n.is_collection()), "collection"),
            CustomNodeDefinition::new(json_edit_policy::filter(|_| true), "anything"),
        ];
        for node in nodes(&data) {
            let matched = resolve_customization(&node, &definitions).unwrap().unwrap();
            let expected = if node.is_collection() { 0 } else { 1 };
            prop_assert_eq!(matched.index, expected);
        }
    }
}
