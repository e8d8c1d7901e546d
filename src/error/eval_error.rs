use thiserror::Error;

/// Represents all errors that can occur during strict evaluation.
///
/// Every variant is recoverable: supply a table that knows the name and
/// evaluate the same [`Evaluator`](crate::Evaluator) again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No table binds the variable.
    #[error("Variable '{name}' not found")]
    VariableNotFound {
        /// The name of the variable.
        name: String,
    },
    /// No table binds the one-argument function.
    #[error("Function '{name}' not found")]
    UnaryFunctionNotFound {
        /// The name of the function.
        name: String,
    },
    /// No table binds the two-argument function.
    #[error("Function '{name}' not found")]
    BinaryFunctionNotFound {
        /// The name of the function.
        name: String,
    },
}

impl EvalError {
    /// The name that could not be resolved.
    ///
    /// # Example
    /// ```
    /// use mathparse::EvalError;
    ///
    /// let err = EvalError::VariableNotFound { name: "t".to_string() };
    /// assert_eq!(err.name(), "t");
    /// assert_eq!(err.to_string(), "Variable 't' not found");
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::VariableNotFound { name }
            | Self::UnaryFunctionNotFound { name }
            | Self::BinaryFunctionNotFound { name } => name,
        }
    }
}
