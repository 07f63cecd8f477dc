use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("{0}")]
    ArityError(String),

    #[error("Unknown expression: {0}")]
    UnknownExpression(String),

    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    #[error("NOT_CONTAINER")]
    NotContainer,

    #[error("NOT_STRING_INDEX")]
    NotStringIndex,

    #[error("NOT_ARRAY")]
    NotArray,

    #[error("NOT_OBJECT")]
    NotObject,

    #[error("Invalid literal.")]
    InvalidLiteral,

    #[error("varname must be a string.")]
    VarnameMustBeString,

    #[error("invalid variable pointer: {0}")]
    InvalidPointer(String),

    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{0}")]
    Thrown(String),
}
