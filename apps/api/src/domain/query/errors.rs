use thiserror::Error;

/// Errors raised while parsing or applying a list query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown operator '{operator}' on field {field}")]
    UnknownOperator { field: String, operator: String },

    #[error("Operator '{operator}' is not supported on field {field}")]
    UnsupportedOperator {
        field: String,
        operator: &'static str,
    },

    #[error("Invalid value '{value}' for field {field}")]
    InvalidValue { field: String, value: String },

    #[error("Malformed query parameter: {0}")]
    MalformedKey(String),
}
