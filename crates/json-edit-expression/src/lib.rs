//! Declarative JSON expressions.
//!
//! Expressions are JSON arrays of the form `[operator, ...operands]`; any
//! other value, and any single-element array, is a literal. They let node
//! predicates and value generators live in configuration files instead of
//! code.
//!
//! # Example
//!
//! ```
//! use json_edit_expression::Expression;
//! use serde_json::json;
//!
//! let expr = Expression::new(json!(["||", ["==", ["$", "/key"], "id"], ["<=", ["$", "/level"], 1]])).unwrap();
//! let scope = json!({"key": "name", "level": 2});
//! assert!(!expr.test(&scope).unwrap());
//! let scope = json!({"key": "id", "level": 2});
//! assert!(expr.test(&scope).unwrap());
//! ```

pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod expression;
pub mod operators;
pub mod scope;
pub mod types;
pub mod util;

pub use error::ExprError;
pub use eval_ctx::EvalCtx;
pub use evaluate::{evaluate, validate};
pub use expression::{default_operators, Expression};
pub use operators::operators_map;
pub use scope::Scope;
pub use types::{Arity, JsValue, OperatorDefinition, OperatorMap};
