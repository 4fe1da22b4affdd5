//! Error types for the query-expression compiler

use thiserror::Error;

/// The result type for compiler operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Errors raised while rendering a query graph to SQL.
///
/// All variants signal a programming error in the code assembling the
/// statement, not recoverable user input. The compiler never degrades to
/// emitting an unvalidated fragment; it returns one of these instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// An operand or argument that cannot be rendered
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A comparison operator outside the whitelist
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// A function name that fails identifier validation
    #[error("Invalid function name: {0}")]
    InvalidFunctionName(String),

    /// A CASE expression with no WHEN/THEN branches
    #[error("CASE expression has no branches")]
    EmptyCaseExpression,

    /// A simple CASE expression with no subject
    #[error("Simple CASE expression is missing its subject")]
    MissingCaseSubject,

    /// A WHEN operand that is neither an expression, a string, nor a number
    #[error("Invalid WHEN expression: {0}")]
    InvalidWhenExpression(String),
}

impl QueryError {
    /// Create an invalid-expression error
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Create an invalid-operator error
    pub fn invalid_operator(token: impl Into<String>) -> Self {
        Self::InvalidOperator(token.into())
    }

    /// Create an invalid-function-name error
    pub fn invalid_function_name(name: impl Into<String>) -> Self {
        Self::InvalidFunctionName(name.into())
    }

    /// Create an invalid-when-expression error
    pub fn invalid_when(message: impl Into<String>) -> Self {
        Self::InvalidWhenExpression(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QueryError::invalid_operator("BETWEEN");
        assert_eq!(err.to_string(), "Invalid operator: BETWEEN");

        let err = QueryError::invalid_function_name("1BAD");
        assert_eq!(err.to_string(), "Invalid function name: 1BAD");

        let err = QueryError::EmptyCaseExpression;
        assert_eq!(err.to_string(), "CASE expression has no branches");
    }
}
