use crate::scope::Scope;
use crate::types::OperatorMap;
use std::sync::Arc;

/// The execution context passed to every operator eval function.
pub struct EvalCtx<'a> {
    pub scope: &'a dyn Scope,
    /// The operator map used for recursive evaluation.
    pub operators: Arc<OperatorMap>,
}

impl<'a> EvalCtx<'a> {
    pub fn new(scope: &'a dyn Scope, operators: Arc<OperatorMap>) -> Self {
        EvalCtx { scope, operators }
    }
}
