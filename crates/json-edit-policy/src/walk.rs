//! Depth-first traversal producing node contexts.

use crate::config::EditorConfig;
use crate::error::PolicyError;
use crate::node::JsonNode;
use crate::resolver::{NodeDecision, NodePolicyResolver};
use json_edit_pointer::{format_accessor, Path};
use serde::Serialize;
use serde_json::Value;
use std::ops::ControlFlow;

/// Visits every node of `root` in pre-order, children in document order.
///
/// Returns the visitor's break value if it stopped the walk early.
pub fn walk<'a, B, F>(root: &'a Value, mut visit: F) -> Option<B>
where
    F: FnMut(&JsonNode<'a>) -> ControlFlow<B>,
{
    let mut stack = vec![JsonNode::root(root)];
    while let Some(node) = stack.pop() {
        if let ControlFlow::Break(b) = visit(&node) {
            return Some(b);
        }
        stack.extend(node.children().into_iter().rev());
    }
    None
}

/// Decision for one node of a document, addressed three ways.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub pointer: String,
    /// "Copy path" form, e.g. `data.users[0].name`.
    pub accessor: String,
    pub path: Path,
    #[serde(flatten)]
    pub decision: NodeDecision,
}

impl NodeReport {
    pub fn new(node: &JsonNode<'_>, root_name: &str, decision: NodeDecision) -> Self {
        NodeReport {
            pointer: node.pointer(),
            accessor: format_accessor(root_name, &node.path),
            path: node.path.clone(),
            decision,
        }
    }
}

/// Resolves one node against `config`.
pub fn resolve_node(node: &JsonNode<'_>, config: &EditorConfig) -> Result<NodeReport, PolicyError> {
    let decision = NodePolicyResolver::new(config).resolve(node)?;
    Ok(NodeReport::new(node, &config.root_name, decision))
}

/// Resolves every node of `root`, stopping at the first failing rule.
pub fn resolve_tree(root: &Value, config: &EditorConfig) -> Result<Vec<NodeReport>, PolicyError> {
    let mut reports = Vec::new();
    let failure = walk(root, |node| match resolve_node(node, config) {
        Ok(report) => {
            reports.push(report);
            ControlFlow::Continue(())
        }
        Err(err) => ControlFlow::Break(err),
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Restriction;
    use serde_json::json;

    #[test]
    fn test_walk_is_preorder_in_document_order() {
        let data = json!({"b": [1, {"c": 2}], "a": null});
        let mut seen = Vec::new();
        let stopped: Option<()> = walk(&data, |node| {
            seen.push(node.pointer());
            ControlFlow::Continue(())
        });
        assert!(stopped.is_none());
        assert_eq!(seen, vec!["", "/b", "/b/0", "/b/1", "/b/1/c", "/a"]);
    }

    #[test]
    fn test_walk_stops_early() {
        let data = json!([[1, 2], 3]);
        let mut count = 0;
        let found = walk(&data, |node| {
            count += 1;
            if node.value == &json!(2) {
                ControlFlow::Break(node.pointer())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(found.as_deref(), Some("/0/1"));
        assert_eq!(count, 4);
    }

    #[test]
    fn test_resolve_tree_reports() {
        let data = json!({"id": 1, "tags": ["x"]});
        let config = EditorConfig::new()
            .with_root_name("record")
            .with_restrict_edit(Restriction::when(|n| n.key_is("id")));
        let reports = resolve_tree(&data, &config).unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[1].accessor, "record.id");
        assert!(!reports[1].decision.capabilities.can_edit);
        assert_eq!(reports[3].accessor, "record.tags[0]");
        assert!(reports[3].decision.capabilities.can_edit);
    }

    #[test]
    fn test_resolve_tree_surfaces_rule_failure() {
        let data = json!({"a": 1});
        let config = EditorConfig::new().with_restrict_add(Restriction::try_when(|n| {
            if n.level > 0 {
                Err(crate::error::RuleError::message("too deep"))
            } else {
                Ok(false)
            }
        }));
        let err = resolve_tree(&data, &config).unwrap_err();
        assert!(err.is_configuration());
    }
}
