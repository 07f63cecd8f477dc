//! Operator definitions.

pub mod branching;
pub mod comparison;
pub mod container;
pub mod input;
pub mod logical;
pub mod string;
pub mod type_ops;

use crate::types::{operators_to_map, OperatorDefinition, OperatorMap};
use std::sync::Arc;

pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(comparison::operators());
    ops.extend(logical::operators());
    ops.extend(type_ops::operators());
    ops.extend(container::operators());
    ops.extend(string::operators());
    ops.extend(branching::operators());
    ops.extend(input::operators());
    ops
}

/// Build the operator map from all operators.
pub fn operators_map() -> OperatorMap {
    operators_to_map(all_operators())
}
