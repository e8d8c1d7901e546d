use std::{fmt, sync::Arc};

use crate::{
    ast::{BinaryFn, UnaryFn},
    interpreter::evaluator::function::{
        builtin::{DEFAULT_BINARY_FUNCTIONS, DEFAULT_UNARY_FUNCTIONS, DEFAULT_VARIABLES},
        source::{BinaryFunctionSource, UnaryFunctionSource, VariableSource},
    },
};

/// Shared handle to a variable table.
pub type SharedVariables = Arc<dyn VariableSource + Send + Sync>;
/// Shared handle to a one-argument function table.
pub type SharedUnaryFunctions = Arc<dyn UnaryFunctionSource + Send + Sync>;
/// Shared handle to a two-argument function table.
pub type SharedBinaryFunctions = Arc<dyn BinaryFunctionSource + Send + Sync>;

/// The tables a [`MathParser`](crate::MathParser) was configured with.
///
/// They are consulted at parse time and kept by every
/// [`Evaluator`](crate::Evaluator) the parser produces. A missing table means
/// only the process-wide defaults apply.
#[derive(Clone, Default)]
pub struct Tables {
    /// Variable table.
    pub variables:        Option<SharedVariables>,
    /// One-argument function table.
    pub unary_functions:  Option<SharedUnaryFunctions>,
    /// Two-argument function table.
    pub binary_functions: Option<SharedBinaryFunctions>,
}

impl fmt::Debug for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables")
         .field("variables", &self.variables.is_some())
         .field("unary_functions", &self.unary_functions.is_some())
         .field("binary_functions", &self.binary_functions.is_some())
         .finish()
    }
}

/// Everything one evaluation pass resolves names against.
///
/// A name is looked up in the caller's override table first, then in the
/// [`Tables`] the expression was parsed with, and finally in the default
/// tables. The state is built for a single call and never mutated.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use mathparse::interpreter::evaluator::state::{EvalState, Tables};
///
/// let tables = Tables::default();
/// let vars = HashMap::from([("t".to_string(), 0.5)]);
/// let state = EvalState::new(&tables, false).with_variables(Some(&vars));
///
/// assert_eq!(state.find_variable("t"), Some(0.5));
/// assert_eq!(state.find_variable("pi"), Some(std::f64::consts::PI));
/// assert!(state.find_unary("sin").is_some());
/// assert!(state.find_binary("nope").is_none());
/// ```
#[derive(Clone, Copy)]
pub struct EvalState<'a> {
    variables:                  Option<&'a dyn VariableSource>,
    unary_functions:            Option<&'a dyn UnaryFunctionSource>,
    binary_functions:           Option<&'a dyn BinaryFunctionSource>,
    tables:                     &'a Tables,
    /// Whether unresolved names may be split into products of known names.
    pub implied_multiplication: bool,
}

impl<'a> EvalState<'a> {
    /// Creates a state without caller overrides.
    #[must_use]
    pub fn new(tables: &'a Tables, implied_multiplication: bool) -> Self {
        Self { variables: None,
               unary_functions: None,
               binary_functions: None,
               tables,
               implied_multiplication }
    }

    /// Sets the caller's variable table.
    #[must_use]
    pub fn with_variables(mut self, variables: Option<&'a dyn VariableSource>) -> Self {
        self.variables = variables;
        self
    }

    /// Sets the caller's one-argument function table.
    #[must_use]
    pub fn with_unary_functions(mut self,
                                unary_functions: Option<&'a dyn UnaryFunctionSource>)
                                -> Self {
        self.unary_functions = unary_functions;
        self
    }

    /// Sets the caller's two-argument function table.
    #[must_use]
    pub fn with_binary_functions(mut self,
                                 binary_functions: Option<&'a dyn BinaryFunctionSource>)
                                 -> Self {
        self.binary_functions = binary_functions;
        self
    }

    /// Resolves a variable name.
    #[must_use]
    pub fn find_variable(&self, name: &str) -> Option<f64> {
        self.variables
            .and_then(|table| table.variable(name))
            .or_else(|| self.tables.variables.as_ref().and_then(|table| table.variable(name)))
            .or_else(|| DEFAULT_VARIABLES.variable(name))
    }

    /// Resolves a one-argument function name.
    #[must_use]
    pub fn find_unary(&self, name: &str) -> Option<UnaryFn> {
        self.unary_functions
            .and_then(|table| table.unary_function(name))
            .or_else(|| {
                self.tables
                    .unary_functions
                    .as_ref()
                    .and_then(|table| table.unary_function(name))
            })
            .or_else(|| DEFAULT_UNARY_FUNCTIONS.unary_function(name))
    }

    /// Resolves a two-argument function name.
    #[must_use]
    pub fn find_binary(&self, name: &str) -> Option<BinaryFn> {
        self.binary_functions
            .and_then(|table| table.binary_function(name))
            .or_else(|| {
                self.tables
                    .binary_functions
                    .as_ref()
                    .and_then(|table| table.binary_function(name))
            })
            .or_else(|| DEFAULT_BINARY_FUNCTIONS.binary_function(name))
    }
}
